use std::sync::Arc;

use crate::auth::Authorizer;
use tokenvault_core::authority::AuthoritySet;
use tokenvault_core::store::TokenStore;
use tokenvault_core::transform::Transform;
use tokenvault_core::vault::TokenVault;

pub type SharedVault = Arc<TokenVault<Box<dyn TokenStore>, Box<dyn Transform>>>;
pub type SharedAuthorizer = Arc<Authorizer>;

#[derive(Clone)]
pub struct AppState {
    pub vault: SharedVault,
    pub authorizer: SharedAuthorizer,
    pub authorities: Arc<AuthoritySet>,
}

impl AppState {
    pub fn new(
        vault: SharedVault,
        authorizer: SharedAuthorizer,
        authorities: Arc<AuthoritySet>,
    ) -> Self {
        Self {
            vault,
            authorizer,
            authorities,
        }
    }
}
