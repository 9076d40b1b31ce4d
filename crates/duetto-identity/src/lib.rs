//! Gateway-injected identity types shared by duetto services.

pub mod identity;
