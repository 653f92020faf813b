pub mod bot_settings;
pub mod comparison_view;
pub mod conversation_list;
pub mod conversation_page;
pub mod home;
pub mod settings_page;
pub mod sidebar;
