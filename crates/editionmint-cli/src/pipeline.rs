//! The mint pipeline.
//!
//! One interactive, single-shot run: collect input, verify the contract and
//! its ownership, pin the artifacts, estimate, submit, await confirmation,
//! decode the confirmation event and persist the record. Stages run strictly
//! in sequence and a fatal failure at any stage aborts the whole run; the
//! only recoverable failure is a failed gas estimate, which the operator may
//! explicitly override.

use chrono::Utc;
use colored::Colorize;
use editionmint_sdk::{events, ChainClient, EditionsContract, SdkError};
use editionmint_types::{Address, Hash};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::output::{self, format_eth, print_info, print_success, print_warning};
use crate::prompt::Prompt;
use crate::publish::{metadata_document, ArtifactStore, UploadError};
use crate::record::{self, MintRecord, MintStatus};

/// The contract's legacy prompt argument. Prompt tracking was removed, the
/// argument stays empty.
const EMPTY_PROMPT: &str = "";

/// User-supplied intent for one mint run.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub asset_path: PathBuf,
    pub name: String,
    pub description: String,
    pub edition_size: u64,
    pub recipient: Address,
}

/// Content identifiers produced by the publish stage. The metadata document
/// embeds the image CID, so the image is always pinned first.
#[derive(Debug, Clone)]
pub struct PublishedArtifact {
    pub image_cid: String,
    pub metadata_cid: String,
    pub token_uri: String,
}

/// What the chain reported back for the submitted transaction.
#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub tx_hash: Hash,
    pub success: bool,
    pub gas_used: u64,
    pub block_number: u64,
    pub token_id: Option<u64>,
}

/// How a run ended, short of an error.
#[derive(Debug)]
pub enum MintRun {
    /// The edition was minted and recorded.
    Minted {
        record: MintRecord,
        record_path: PathBuf,
    },
    /// The operator declined to proceed past a failed gas estimate.
    Declined,
}

/// Everything that can abort a run.
#[derive(Debug, Error)]
pub enum MintError {
    /// Bad or missing user input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Prompt I/O failed
    #[error("Prompt failed")]
    Prompt(#[from] io::Error),

    /// The node could not be reached or answered nonsense
    #[error("{operation} failed")]
    Connectivity {
        operation: &'static str,
        source: SdkError,
    },

    /// No deployed code at the configured address
    #[error("No contract found at address {0}")]
    ContractNotFound(Address),

    /// Minting is owner-restricted and the caller is not the owner
    #[error("You ({caller}) are not the owner of this contract ({owner}). Only the owner can mint.")]
    NotOwner { caller: Address, owner: Address },

    /// An upload to the pinning service failed
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The mint transaction could not be submitted
    #[error("Failed to submit the mint transaction")]
    Submission(#[source] SdkError),

    /// The record write failed after the mint already happened on chain
    #[error(
        "The mint succeeded on chain (transaction {}) but its record could not be written in {}",
        .tx_hash, .dir.display()
    )]
    Persistence {
        dir: PathBuf,
        tx_hash: Hash,
        source: io::Error,
    },
}

/// Check the asset exists and is a readable file.
pub fn validate_asset_path(input: &str) -> Result<PathBuf, MintError> {
    let path = PathBuf::from(input.trim());
    if let Err(e) = std::fs::File::open(&path) {
        return Err(MintError::Validation(format!(
            "File not found at {}: {e}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(MintError::Validation(format!(
            "{} is not a file",
            path.display()
        )));
    }
    Ok(path)
}

/// Parse an edition size: a strictly positive integer.
pub fn parse_edition_size(input: &str) -> Result<u64, MintError> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(size) if size > 0 => Ok(size as u64),
        _ => Err(MintError::Validation(format!(
            "Edition size must be a positive number, got {trimmed:?}"
        ))),
    }
}

/// Use the trimmed input when given, otherwise fall back to the caller's own
/// address.
pub fn resolve_recipient(input: &str, fallback: Address) -> Result<Address, MintError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(fallback);
    }
    trimmed
        .parse()
        .map_err(|e| MintError::Validation(format!("Invalid recipient address {trimmed:?}: {e}")))
}

/// One single-shot mint run. The pipeline owns its collaborators, the prompt
/// included, so they are released on every exit path.
pub struct MintPipeline<C, S, P> {
    chain: C,
    store: S,
    prompt: P,
    network: String,
    contract_address: Address,
    gateway_url: String,
    output_dir: PathBuf,
}

impl<C: ChainClient, S: ArtifactStore, P: Prompt> MintPipeline<C, S, P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain: C,
        store: S,
        prompt: P,
        network: impl Into<String>,
        contract_address: Address,
        gateway_url: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            chain,
            store,
            prompt,
            network: network.into(),
            contract_address,
            gateway_url: gateway_url.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Run the pipeline to completion.
    pub async fn run(self) -> Result<MintRun, MintError> {
        let Self {
            chain,
            store,
            mut prompt,
            network,
            contract_address,
            gateway_url,
            output_dir,
        } = self;

        println!("{}", "===== EDITIONS NFT MINTING TOOL =====".bold());
        println!("This tool creates editions (multiple copies) of an NFT");
        println!();

        // 1. Collect and validate input. Nothing touches the network until
        // everything local checks out.
        let asset_input = prompt.input("Path to your image file")?;
        let asset_path = validate_asset_path(&asset_input)?;
        let name = prompt.input("Name for your NFT")?;
        let description = prompt.input("Description for your NFT (optional)")?;
        let size_input = prompt.input("Edition size (number of copies to mint)")?;
        let edition_size = parse_edition_size(&size_input)?;
        let recipient_input = prompt.input("Recipient address (leave blank to use your own)")?;

        // 2. Identify the caller and resolve the recipient.
        let accounts = chain.accounts().await.map_err(|source| MintError::Connectivity {
            operation: "Account lookup",
            source,
        })?;
        let caller = *accounts.first().ok_or_else(|| {
            MintError::Validation("the node manages no accounts; cannot determine the caller".to_string())
        })?;
        let recipient = resolve_recipient(&recipient_input, caller)?;

        let balance = chain.balance(&caller).await.map_err(|source| MintError::Connectivity {
            operation: "Balance query",
            source,
        })?;

        println!();
        println!("Your wallet balance: {}", format_eth(balance).bright_green());
        println!("Using image file:    {}", asset_path.display());
        println!("Edition size:        {edition_size}");
        println!("Recipient address:   {}", recipient.to_string().bright_cyan());
        println!();

        let request = MintRequest {
            asset_path,
            name,
            description,
            edition_size,
            recipient,
        };

        // 3. Bind the contract and verify we are allowed to mint, before
        // anything gets uploaded.
        print_info(&format!("Connecting to contract at {contract_address}..."));
        let contract = EditionsContract::new(&chain, contract_address);
        let deployed = contract.exists().await.map_err(|source| MintError::Connectivity {
            operation: "Contract code lookup",
            source,
        })?;
        if !deployed {
            return Err(MintError::ContractNotFound(contract_address));
        }

        let owner = contract.owner().await.map_err(|source| MintError::Connectivity {
            operation: "Ownership check",
            source,
        })?;
        log::debug!("contract owner is {owner}, caller is {caller}");
        if owner != caller {
            return Err(MintError::NotOwner { caller, owner });
        }
        print_success("Connected to contract");

        // 4. Pin the image, then the metadata that references it.
        let artifact = publish_artifact(&store, &request).await?;

        // 5. Gas estimate. Estimation can fail spuriously on stale node
        // state even when the real call would succeed, so a failure here is
        // the one thing the operator may override.
        println!();
        print_info(&format!("Creating edition of {edition_size} copies..."));
        match contract
            .estimate_create_edition(
                caller,
                request.recipient,
                request.edition_size,
                &artifact.token_uri,
                EMPTY_PROMPT,
            )
            .await
        {
            Ok(gas) => println!("Estimated gas: {}", gas.to_string().bright_yellow()),
            Err(e) => {
                print_warning(&format!("Gas estimation failed: {e}"));
                if !prompt.confirm("Continue anyway?")? {
                    return Ok(MintRun::Declined);
                }
            }
        }

        // 6. Submit.
        let tx_hash = contract
            .create_edition(
                caller,
                request.recipient,
                request.edition_size,
                &artifact.token_uri,
                EMPTY_PROMPT,
            )
            .await
            .map_err(MintError::Submission)?;
        println!("Transaction hash: {}", tx_hash.to_string().bright_green());

        // 7. Await confirmation. The wait cannot be aborted; each poll is
        // bounded only by the transport timeout.
        let spinner = output::create_spinner("Waiting for transaction confirmation...");
        let receipt = match chain.wait_for_transaction(&tx_hash).await {
            Ok(receipt) => {
                spinner.finish_with_message("Confirmed!");
                receipt
            }
            Err(source) => {
                spinner.finish_and_clear();
                return Err(MintError::Connectivity {
                    operation: "Confirmation wait",
                    source,
                });
            }
        };
        output::print_receipt(&receipt);
        if receipt.is_failure() {
            print_warning(
                "The mint transaction reverted on chain. The run record will be kept with \
                 status \"failed\" and the token id will stay unknown.",
            );
        }

        // 8. Recover the token id from the confirmation event, if present.
        let token_id = events::extract_token_id(&receipt, contract_address);
        match token_id {
            Some(id) => print_success(&format!("Found EditionCreated event with token ID {id}")),
            None => print_warning("No EditionCreated event found; token ID is unknown"),
        }

        let outcome = MintOutcome {
            tx_hash,
            success: receipt.is_success(),
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
            token_id,
        };

        // 9. Persist. This is the one stage whose failure happens after the
        // irreversible on-chain effect, so the error says so.
        let record = build_record(&network, contract_address, &gateway_url, &request, &artifact, &outcome);
        let record_path =
            record::write_record(&record, &output_dir).map_err(|source| MintError::Persistence {
                dir: output_dir.clone(),
                tx_hash,
                source,
            })?;

        output::print_heading("EDITION CREATED");
        println!("- Edition size:     {} copies", record.edition_size);
        println!("- Token ID:         {}", record.token_id);
        println!("- Contract address: {}", record.contract_address);
        println!("- Owner:            {}", record.owner);
        println!("- Token URI:        {}", record.token_uri);
        println!("- Image URL:        {}", record.image_url);
        println!("- Metadata URL:     {}", record.metadata_url);
        println!();
        print_success(&format!("Edition info saved to {}", record_path.display()));

        Ok(MintRun::Minted {
            record,
            record_path,
        })
    }
}

/// Pin the image, then the metadata document that embeds its CID. The order
/// is a hard dependency, not an optimization target. A failure between the
/// two uploads leaves an orphaned image blob behind; content addressing
/// makes that harmless and a re-run idempotent, so no cleanup is attempted.
async fn publish_artifact<S: ArtifactStore>(
    store: &S,
    request: &MintRequest,
) -> Result<PublishedArtifact, MintError> {
    print_info("Uploading image to the pinning service...");
    let image_cid = store.pin_file(&request.asset_path).await?;
    print_success(&format!("Image pinned: {image_cid}"));

    let document = metadata_document(
        &request.name,
        &request.description,
        &image_cid,
        &Utc::now().to_rfc3339(),
    );
    print_info("Uploading metadata...");
    let metadata_cid = store.pin_json(&document).await?;
    print_success(&format!("Metadata pinned: {metadata_cid}"));

    Ok(PublishedArtifact {
        token_uri: format!("ipfs://{metadata_cid}"),
        image_cid,
        metadata_cid,
    })
}

fn build_record(
    network: &str,
    contract_address: Address,
    gateway_url: &str,
    request: &MintRequest,
    artifact: &PublishedArtifact,
    outcome: &MintOutcome,
) -> MintRecord {
    let gateway = gateway_url.trim_end_matches('/');
    MintRecord {
        contract_address,
        owner: request.recipient,
        token_id: outcome.token_id.into(),
        token_uri: artifact.token_uri.clone(),
        image_ipfs_hash: artifact.image_cid.clone(),
        metadata_ipfs_hash: artifact.metadata_cid.clone(),
        name: request.name.clone(),
        description: request.description.clone(),
        original_image_path: request.asset_path.display().to_string(),
        image_url: format!("{gateway}/{}", artifact.image_cid),
        metadata_url: format!("{gateway}/{}", artifact.metadata_cid),
        edition_size: request.edition_size,
        mint_time: Utc::now().to_rfc3339(),
        transaction_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        network: network.to_string(),
        status: if outcome.success {
            MintStatus::Success
        } else {
            MintStatus::Failed
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_asset_path_accepts_readable_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"png bytes").unwrap();

        let path = validate_asset_path(&file.path().display().to_string()).unwrap();
        assert_eq!(path, file.path());
    }

    #[test]
    fn test_validate_asset_path_rejects_missing_file() {
        let err = validate_asset_path("/definitely/not/here/cat.png").unwrap_err();
        assert!(matches!(err, MintError::Validation(_)));
    }

    #[test]
    fn test_validate_asset_path_rejects_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = validate_asset_path(&dir.path().display().to_string()).unwrap_err();
        assert!(matches!(err, MintError::Validation(_)));
    }

    #[test]
    fn test_parse_edition_size() {
        assert_eq!(parse_edition_size("5").unwrap(), 5);
        assert_eq!(parse_edition_size(" 12 ").unwrap(), 12);
        assert!(parse_edition_size("0").is_err());
        assert!(parse_edition_size("-3").is_err());
        assert!(parse_edition_size("five").is_err());
        assert!(parse_edition_size("").is_err());
    }

    #[test]
    fn test_resolve_recipient_falls_back_to_caller() {
        let caller = Address::from_bytes([0xabu8; 20]);
        assert_eq!(resolve_recipient("", caller).unwrap(), caller);
        assert_eq!(resolve_recipient("   ", caller).unwrap(), caller);
    }

    #[test]
    fn test_resolve_recipient_parses_trimmed_input() {
        let caller = Address::from_bytes([0xabu8; 20]);
        let other = "  0x2222222222222222222222222222222222222222  ";
        assert_eq!(
            resolve_recipient(other, caller).unwrap(),
            Address::from_bytes([0x22u8; 20])
        );
        assert!(resolve_recipient("0xnothex", caller).is_err());
    }

    #[test]
    fn test_build_record_gateway_urls() {
        let request = MintRequest {
            asset_path: PathBuf::from("cat.png"),
            name: "Cat #1".to_string(),
            description: String::new(),
            edition_size: 5,
            recipient: Address::from_bytes([0xabu8; 20]),
        };
        let artifact = PublishedArtifact {
            image_cid: "Qmimg".to_string(),
            metadata_cid: "Qmmeta".to_string(),
            token_uri: "ipfs://Qmmeta".to_string(),
        };
        let outcome = MintOutcome {
            tx_hash: Hash::ZERO,
            success: true,
            gas_used: 21_000,
            block_number: 100,
            token_id: Some(7),
        };

        let record = build_record(
            "localhost",
            Address::from_bytes([0x07u8; 20]),
            "https://gateway.pinata.cloud/ipfs/",
            &request,
            &artifact,
            &outcome,
        );
        assert_eq!(record.image_url, "https://gateway.pinata.cloud/ipfs/Qmimg");
        assert_eq!(record.metadata_url, "https://gateway.pinata.cloud/ipfs/Qmmeta");
        assert_eq!(record.status, MintStatus::Success);
    }
}
