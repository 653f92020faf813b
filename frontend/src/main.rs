mod api;
mod components;
mod storage;
mod store;

use components::conversation_list::ConversationList;
use components::conversation_page::ConversationPage;
use components::home::Home;
use components::settings_page::SettingsPage;
use components::sidebar::Sidebar;
use store::{State, StoreContext, View};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            <div class="app-container">
                <div class="sidebar-container">
                    <Sidebar />
                </div>
                <div class="main-stage">
                    {match store.view {
                        View::Home => html! { <Home /> },
                        View::Conversations => html! { <ConversationList /> },
                        View::Conversation => html! { <ConversationPage /> },
                        View::Settings => html! { <SettingsPage /> },
                    }}
                </div>
            </div>
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
