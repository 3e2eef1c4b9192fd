// Reference data — entity aspect texts and labeled evaluation sentences.

pub mod sentences;
pub mod store;
