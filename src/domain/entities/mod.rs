pub mod aggregated_notification;
pub mod interaction;
pub mod post;
pub mod promotion;
pub mod watermark;

pub use aggregated_notification::{AggregatedNotification, SenderIdentity, SYSTEM_SENDER_NAME};

pub use interaction::{InteractionEvent, InteractionKind};

pub use post::{PostDisplayFields, PostId, PostSnapshot, UserId};

pub use promotion::{PromotionEvent, PromotionStatus};

pub use watermark::{ClearedMap, LastOpenedMarker};
