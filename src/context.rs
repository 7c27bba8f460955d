//! Application Context
//!
//! Auth session, reload trigger, and transient notices shared through the
//! Leptos context API. The session is read once from browser storage and
//! threaded explicitly into every mutating flow.

use leptos::prelude::*;

/// Authenticated-session view consumed by mutating flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSession {
    pub logged_in: bool,
    pub member_id: Option<i64>,
}

impl AuthSession {
    /// Session storage key the login flow sets to `"true"`
    pub const LOGGED_IN_KEY: &'static str = "isLoggedIn";
    /// Session storage key holding the member id, when known
    pub const MEMBER_ID_KEY: &'static str = "memberId";

    /// Read the flags the login flow leaves in browser session storage
    pub fn from_browser() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten();
        let Some(storage) = storage else {
            return Self::default();
        };
        let logged_in =
            storage.get_item(Self::LOGGED_IN_KEY).ok().flatten().as_deref() == Some("true");
        let member_id = storage
            .get_item(Self::MEMBER_ID_KEY)
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok());
        Self { logged_in, member_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One transient toast entry
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub auth: ReadSignal<AuthSession>,
    /// Trigger to refetch the playlist - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    pub notices: ReadSignal<Vec<Notice>>,
    set_notices: WriteSignal<Vec<Notice>>,
    notice_seq: RwSignal<u32>,
}

impl AppContext {
    pub fn new(auth: ReadSignal<AuthSession>) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (notices, set_notices) = signal(Vec::<Notice>::new());
        Self {
            auth,
            reload_trigger,
            set_reload_trigger,
            notices,
            set_notices,
            notice_seq: RwSignal::new(0),
        }
    }

    /// Trigger a refetch of the playlist
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn notify(&self, title: &str, body: &str) {
        self.push(NoticeKind::Info, title, body);
    }

    pub fn notify_error(&self, title: &str, body: &str) {
        self.push(NoticeKind::Error, title, body);
    }

    /// Standard prompt for mutating actions without a session
    pub fn login_required(&self) {
        self.notify_error("로그인이 필요합니다", "플레이리스트를 수정하려면 로그인해주세요.");
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, title: &str, body: &str) {
        let id = self.notice_seq.get_untracked() + 1;
        self.notice_seq.set(id);
        self.set_notices.update(|list| {
            list.push(Notice {
                id,
                kind,
                title: title.to_string(),
                body: body.to_string(),
            })
        });
    }
}
