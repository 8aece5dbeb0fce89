pub mod form;
pub mod notification;
pub mod payment_id;
pub mod route;
pub mod step;

pub use form::{CONTRACT_NUMBER_LEN, CONTRACT_PREFIX, ContractNumber, FormData, FormField, PayerInfo};
pub use notification::{Notification, Severity};
pub use payment_id::{PaymentId, PaymentIdParseError};
pub use route::Route;
pub use step::{PaymentMethod, Step};
