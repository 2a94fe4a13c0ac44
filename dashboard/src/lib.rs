pub mod markup;
pub mod session;
pub mod view;

pub use markup::{Block, Span};
pub use session::{
    Dashboard, Message, Notification, NotificationKind, SearchOutcome, SearchTicket,
};
pub use view::{ChartSlice, CloudWord, DashboardView};
