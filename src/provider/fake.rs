//! In-memory provider used by dashboard and API tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{AccountDetails, AccountId, Asset, Earning, Institution, Provider, ProviderError};

#[derive(Default)]
pub(crate) struct FakeProvider {
    codes: Mutex<HashMap<String, AccountId>>,
    accounts: Mutex<HashMap<AccountId, AccountDetails>>,
    assets: Mutex<HashMap<AccountId, Vec<Asset>>>,
    earnings: Mutex<HashMap<AccountId, Vec<Earning>>>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account reachable through `code`
    pub fn with_account(self, code: &str, id: &str, name: &str, institution: &str) -> Self {
        let id = AccountId::new(id);
        self.codes.lock().unwrap().insert(code.to_string(), id.clone());
        self.accounts.lock().unwrap().insert(
            id,
            AccountDetails {
                name: name.to_string(),
                institution: Institution {
                    name: institution.to_string(),
                },
            },
        );
        self
    }

    /// Register a code whose account has no details on record
    pub fn with_code(self, code: &str, id: &str) -> Self {
        self.codes
            .lock()
            .unwrap()
            .insert(code.to_string(), AccountId::new(id));
        self
    }

    pub fn with_assets(self, id: &str, assets: Vec<Asset>) -> Self {
        self.set_assets(id, assets);
        self
    }

    pub fn with_earnings(self, id: &str, earnings: Vec<Earning>) -> Self {
        self.earnings
            .lock()
            .unwrap()
            .insert(AccountId::new(id), earnings);
        self
    }

    pub fn set_assets(&self, id: &str, assets: Vec<Asset>) {
        self.assets.lock().unwrap().insert(AccountId::new(id), assets);
    }

    /// Make every call fail as if the network were down
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Paths requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, path: String) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(path);
        if self.offline.load(Ordering::SeqCst) {
            Err(ProviderError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn not_found(path: &str) -> ProviderError {
        ProviderError::Api {
            status: 404,
            message: format!("{} not found", path),
        }
    }
}

pub(crate) fn asset(name: &str, cost: f64, quantity: f64) -> Asset {
    Asset {
        name: name.to_string(),
        asset_type: "stock".to_string(),
        cost,
        quantity,
        currency: "USD".to_string(),
        ..Default::default()
    }
}

pub(crate) fn earning(narration: &str, amount: f64) -> Earning {
    Earning {
        amount,
        narration: narration.to_string(),
        date: "2023-02-17".to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn exchange_code(&self, code: &str) -> Result<AccountId, ProviderError> {
        self.enter("account/auth".to_string())?;
        self.codes
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| ProviderError::Api {
                status: 400,
                message: "invalid code".to_string(),
            })
    }

    async fn account_info(&self, id: &AccountId) -> Result<AccountDetails, ProviderError> {
        let path = format!("accounts/{}", id);
        self.enter(path.clone())?;
        self.accounts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(&path))
    }

    async fn assets(&self, id: &AccountId) -> Result<Vec<Asset>, ProviderError> {
        let path = format!("accounts/{}/assets", id);
        self.enter(path.clone())?;
        self.assets
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(&path))
    }

    async fn earnings(&self, id: &AccountId) -> Result<Vec<Earning>, ProviderError> {
        let path = format!("accounts/{}/earnings", id);
        self.enter(path.clone())?;
        self.earnings
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(&path))
    }
}
