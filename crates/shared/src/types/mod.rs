mod uuid;
pub use self::uuid::*;
