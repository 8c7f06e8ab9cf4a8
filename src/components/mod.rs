mod calendar_panel;
mod chat_panel;
mod files_panel;
mod home_panel;
mod layout;
mod login;
mod notes_panel;
mod saved_toast;
mod task_board;
mod task_editor;
mod whiteboard_panel;

pub use calendar_panel::CalendarPanel;
pub use chat_panel::ChatPanel;
pub use files_panel::FilesPanel;
pub use home_panel::HomePanel;
pub use layout::{Layout, Panel};
pub use login::Login;
pub use notes_panel::NotesPanel;
pub use saved_toast::SavedToast;
pub use task_board::TaskBoardView;
pub use task_editor::TaskEditor;
pub use whiteboard_panel::WhiteboardPanel;
