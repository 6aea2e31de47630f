pub mod name;
pub mod phone;

pub use name::{name_candidates, normalize_tilde};
pub use phone::{phone_candidates, PhoneRules};
