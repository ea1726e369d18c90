mod contacts;

pub use contacts::{ContactStore, NewContact, PgContactStore, StoreError};
