//! Client bundle
//!
//! Wires the session, transport and resource clients together from one
//! configuration. Screens usually take this bundle and hand the relevant
//! resource client to their coordinator.

use crate::{
    AuthClient, CategoriesClient, ClientConfig, HttpClient, ProductsClient, SessionHandle,
    SessionStore, SubcategoriesClient,
};

#[derive(Debug, Clone)]
pub struct SouqClient {
    pub auth: AuthClient,
    pub categories: CategoriesClient,
    pub subcategories: SubcategoriesClient,
    pub products: ProductsClient,
    session: SessionHandle,
}

impl SouqClient {
    /// Build the bundle. When the config names a session path, a previously
    /// persisted session is restored so the client starts authenticated.
    pub fn new(config: &ClientConfig) -> Self {
        let store = config.session_path.as_ref().map(SessionStore::new);
        let session = match &store {
            Some(store) => SessionHandle::restore(store),
            None => SessionHandle::new(),
        };
        let http = HttpClient::new(config, session.clone());

        Self {
            auth: AuthClient::new(http.clone(), store),
            categories: CategoriesClient::new(http.clone()),
            subcategories: SubcategoriesClient::new(http.clone()),
            products: ProductsClient::new(http),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}
