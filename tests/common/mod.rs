pub mod mock_transport;

use std::sync::Arc;

use polish::credential::Credential;
use polish::Corrector;

pub use mock_transport::MockTransport;

pub const TEST_KEY: &str = "AIzaTestKey123";

pub fn test_key() -> Credential {
    Credential::new(TEST_KEY)
}

/// Corrector wired to a shared mock so the test can inspect it afterwards
pub fn corrector_with(mock: MockTransport) -> (Corrector, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    (Corrector::new(mock.clone()), mock)
}
