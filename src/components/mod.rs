pub mod event_form;
pub mod event_list;
pub mod help;
pub mod month_view;
pub mod notification_list;
pub mod overlap_dialog;
pub mod status_bar;
pub mod week_view;

pub use event_form::EventForm;
pub use event_list::EventList;
pub use help::HelpPopup;
pub use month_view::MonthView;
pub use notification_list::NotificationList;
pub use overlap_dialog::OverlapDialog;
pub use status_bar::StatusBar;
pub use week_view::WeekView;
