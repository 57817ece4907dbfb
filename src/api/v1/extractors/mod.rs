mod principal;

pub use principal::{Principal, PrincipalExtractor};
