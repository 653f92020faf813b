use crate::storage::conversations;
use chrono::Utc;
use shared::models::*;
use shared::transcript::Layout;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Home,
    Conversations,
    Conversation,
    Settings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub view: View,
    pub summaries: Vec<ConversationSummary>,
    pub conversation: Conversation,
    /// Whether `conversation` has been saved; saved conversations auto-persist.
    pub persisted: bool,
    /// Changes whenever another conversation is opened, so late replies can be discarded.
    pub session: Uuid,
    pub credentials: Credentials,
    pub layout: Layout,
    pub is_sending: bool,
    pub notice: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let store = conversations();
        Self {
            view: View::Home,
            summaries: store.list(),
            conversation: Conversation::draft(Utc::now()),
            persisted: false,
            session: Uuid::now_v7(),
            credentials: store.credentials(),
            layout: Layout::default(),
            is_sending: false,
            notice: None,
        }
    }
}

pub enum Action {
    Navigate(View),
    NewConversation,
    OpenConversation(String),
    SaveConversation,
    RenameConversation(String),
    RenameSaved { id: String, name: String },
    DeleteConversation(String),
    UpdateSettings { slot: BotSlot, settings: GenerationSettings },
    UpdateCredentials(Credentials),
    SetLayout(Layout),
    /// Sending flag for the conversation opened as `session`.
    SetSending { session: Uuid, value: bool },
    AppendTurn { session: Uuid, turn: Turn },
    Rate { message_id: Uuid, rating: Rating },
    SetNotice(Option<String>),
}

impl State {
    fn open(&mut self, conversation: Conversation, persisted: bool) {
        self.conversation = conversation;
        self.persisted = persisted;
        self.session = Uuid::now_v7();
        self.is_sending = false;
        self.notice = None;
        self.view = View::Conversation;
    }

    /// Snapshot the active conversation if it has been saved.
    fn autosave(&mut self) {
        if !self.persisted {
            return;
        }
        let mut snapshot = self.conversation.clone();
        if snapshot.name.trim().is_empty() {
            snapshot.name = default_name(&snapshot.id);
        }
        if let Err(e) = conversations().save(&snapshot) {
            tracing::error!("Failed to save conversation {}: {:?}", snapshot.id, e);
            self.notice = Some("Could not save this conversation.".to_string());
        }
        self.summaries = conversations().summaries();
    }
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::Navigate(view) => {
                if view == View::Conversations {
                    next.summaries = conversations().list();
                }
                next.view = view;
            }
            Action::NewConversation => {
                next.open(Conversation::draft(Utc::now()), false);
            }
            Action::OpenConversation(id) => match conversations().load(&id) {
                Some(conversation) => next.open(conversation, true),
                None => {
                    next.summaries = conversations().list();
                    next.view = View::Conversations;
                    next.notice = Some(format!("Conversation {} no longer exists.", id));
                }
            },
            Action::SaveConversation => {
                if !next.persisted {
                    next.conversation.stamp(Utc::now());
                    next.persisted = true;
                }
                next.autosave();
            }
            Action::RenameConversation(name) => {
                next.conversation.name = name;
                next.autosave();
            }
            Action::RenameSaved { id, name } => {
                let name = match name.trim() {
                    "" => default_name(&id),
                    trimmed => trimmed.to_string(),
                };
                match conversations().rename(&id, &name) {
                    Ok(_) if next.persisted && next.conversation.id == id => {
                        next.conversation.name = name;
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!("Failed to rename conversation {}: {:?}", id, e),
                }
                next.summaries = conversations().list();
            }
            Action::DeleteConversation(id) => {
                if let Err(e) = conversations().delete(&id) {
                    tracing::error!("Failed to delete conversation {}: {:?}", id, e);
                }
                if next.persisted && next.conversation.id == id {
                    next.conversation = Conversation::draft(Utc::now());
                    next.persisted = false;
                    next.session = Uuid::now_v7();
                }
                next.summaries = conversations().list();
            }
            Action::UpdateSettings { slot, settings } => {
                next.conversation.set_settings(slot, settings);
                next.autosave();
            }
            Action::UpdateCredentials(credentials) => {
                if let Err(e) = conversations().save_credentials(&credentials) {
                    tracing::error!("Failed to save credentials: {:?}", e);
                }
                next.credentials = credentials;
            }
            Action::SetLayout(layout) => {
                next.layout = layout;
            }
            Action::SetSending { session, value } => {
                if session != next.session {
                    return self;
                }
                next.is_sending = value;
            }
            Action::AppendTurn { session, turn } => {
                if session != next.session {
                    tracing::warn!("Discarding replies for a conversation that is no longer open");
                    return self;
                }
                next.conversation.append_turn(turn);
                next.autosave();
            }
            Action::Rate { message_id, rating } => {
                if next.conversation.rate(message_id, rating) {
                    next.autosave();
                }
            }
            Action::SetNotice(notice) => {
                next.notice = notice;
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;
