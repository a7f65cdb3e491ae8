use std::sync::Arc;

use ethers::prelude::*;

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

// TODO: Allow for different wallet kinds
#[derive(Debug, Clone)]
pub struct RpcSigner(pub Arc<SignerClient>);

impl RpcSigner {
    pub fn address(&self) -> Address {
        self.0.address()
    }
}
