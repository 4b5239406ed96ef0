use uuid::Uuid;

pub struct TestAuth {
    api_key: String,
}

impl TestAuth {
    /// Generate a fresh API key and export it for `Authorizer::from_env`.
    pub fn configured() -> Self {
        let api_key = format!("test-key-{}", Uuid::new_v4().simple());
        // SAFETY: integration tests own the process environment while running.
        unsafe {
            std::env::set_var("TOKENVAULT_API_KEY", &api_key);
        }
        Self { api_key }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
