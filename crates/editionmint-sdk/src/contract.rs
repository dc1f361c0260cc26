//! Bindings for the editions contract.
//!
//! The contract is owner-restricted: only its recorded owner may call
//! `createEdition`. The wrapper exposes exactly the surface the pipeline
//! touches.

use editionmint_types::{Address, Hash};

use crate::abi::{self, Token};
use crate::client::{CallRequest, ChainClient};
use crate::errors::Result;

/// Canonical signature of the owner getter.
const OWNER_SIG: &str = "owner()";

/// Canonical signature of the mint entry point:
/// recipient, edition size, token URI, prompt (unused, kept empty).
const CREATE_EDITION_SIG: &str = "createEdition(address,uint256,string,string)";

/// Handle on a deployed editions contract.
pub struct EditionsContract<'a, C> {
    client: &'a C,
    address: Address,
}

impl<'a, C: ChainClient> EditionsContract<'a, C> {
    /// Bind to a deployed contract address.
    pub fn new(client: &'a C, address: Address) -> Self {
        Self { client, address }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Check that deployed bytecode is present at the address.
    pub async fn exists(&self) -> Result<bool> {
        let code = self.client.code(&self.address).await?;
        Ok(!code.is_empty())
    }

    /// Read the contract's recorded owner.
    pub async fn owner(&self) -> Result<Address> {
        let request = CallRequest {
            from: None,
            to: self.address,
            gas: None,
            data: abi::encode_call(OWNER_SIG, &[]),
        };
        let output = self.client.call(&request).await?;
        abi::decode_address(&output)
    }

    /// Gas estimate for a `createEdition` call.
    pub async fn estimate_create_edition(
        &self,
        from: Address,
        recipient: Address,
        edition_size: u64,
        token_uri: &str,
        prompt: &str,
    ) -> Result<u64> {
        let request = self.create_edition_request(from, recipient, edition_size, token_uri, prompt);
        self.client.estimate_gas(&request).await
    }

    /// Submit the `createEdition` transaction and return its hash.
    pub async fn create_edition(
        &self,
        from: Address,
        recipient: Address,
        edition_size: u64,
        token_uri: &str,
        prompt: &str,
    ) -> Result<Hash> {
        let request = self.create_edition_request(from, recipient, edition_size, token_uri, prompt);
        self.client.send_transaction(&request).await
    }

    fn create_edition_request(
        &self,
        from: Address,
        recipient: Address,
        edition_size: u64,
        token_uri: &str,
        prompt: &str,
    ) -> CallRequest {
        CallRequest {
            from: Some(from),
            to: self.address,
            gas: None,
            data: abi::encode_call(
                CREATE_EDITION_SIG,
                &[
                    Token::Address(recipient),
                    Token::Uint(edition_size),
                    Token::Str(token_uri.to_string()),
                    Token::Str(prompt.to_string()),
                ],
            ),
        }
    }
}
