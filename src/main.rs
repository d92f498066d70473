use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use memetv_ops::config::{self, ChainSettings, Config};
use memetv_ops::core::Context;
use memetv_ops::domain::address::parse_address_arg;
use memetv_ops::domain::units::parse_amount;
use memetv_ops::infrastructure::ethereum::MintPool;
use memetv_ops::infrastructure::AlloyClient;
use memetv_ops::modules::{self, bulk_transfer, token::AllowanceChange};

#[derive(Debug, Parser)]
#[command(
    name = "memetv",
    version,
    about = "Deploy and operate the MemeTV token and its airdrop distributor"
)]
struct Args {
    /// Target network (mainnet, sepolia, matic, BSCTestnet, scrollSepolia, localhost); defaults to $NETWORK
    #[arg(long, global = true)]
    network: Option<String>,

    /// TOML config file; defaults to $MEMETV_CONFIG, ./memetv.toml, then the user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Merkle tree JSON (standard-v1)
    #[arg(long, global = true)]
    tree: Option<PathBuf>,

    /// Directory holding <network>.json deployment records
    #[arg(long, global = true)]
    deployments_dir: Option<PathBuf>,

    /// Hardhat artifacts directory
    #[arg(long, global = true)]
    artifacts_dir: Option<PathBuf>,

    /// Run every check but do not send transactions
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deploy TheMemeTV and Airdrop, then write the deployment record
    Deploy,

    /// Push the local tree's root with updateMerkleRoot (once per UTC day)
    UpdateRoot {
        #[arg(long, value_parser = parse_address_arg)]
        token: Option<Address>,
    },

    /// Send whole-token amounts to many recipients through the airdrop
    BulkTransfer {
        /// Recipients/amounts JSON
        #[arg(long)]
        recipients: Option<PathBuf>,
        #[arg(long, value_parser = parse_address_arg)]
        airdrop: Option<Address>,
        #[arg(long, value_parser = parse_address_arg)]
        token: Option<Address>,
    },

    /// Token reads and writes
    Token {
        /// Token address; defaults to the deployment record
        #[arg(long, global = true, value_parser = parse_address_arg)]
        address: Option<Address>,
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Airdrop administration
    Airdrop {
        /// Airdrop address; defaults to the deployment record
        #[arg(long, global = true, value_parser = parse_address_arg)]
        address: Option<Address>,
        #[command(subcommand)]
        command: AirdropCommand,
    },

    /// Offline Merkle tree tools
    Tree {
        #[command(subcommand)]
        command: TreeCommand,
    },
}

#[derive(Debug, Subcommand)]
enum TokenCommand {
    Status,
    Balance {
        #[arg(long, value_parser = parse_address_arg)]
        account: Option<Address>,
    },
    Allowance {
        #[arg(long, value_parser = parse_address_arg)]
        owner: Option<Address>,
        #[arg(long, value_parser = parse_address_arg)]
        spender: Option<Address>,
    },
    /// Set the allowance (whole tokens); spender defaults to the airdrop
    Approve {
        #[arg(value_parser = parse_amount)]
        amount: U256,
        #[arg(long, value_parser = parse_address_arg)]
        spender: Option<Address>,
    },
    IncreaseAllowance {
        #[arg(value_parser = parse_amount)]
        amount: U256,
        #[arg(long, value_parser = parse_address_arg)]
        spender: Option<Address>,
    },
    DecreaseAllowance {
        #[arg(value_parser = parse_amount)]
        amount: U256,
        #[arg(long, value_parser = parse_address_arg)]
        spender: Option<Address>,
    },
    /// Owner-only: distributeTokens(wallet, supply)
    Distribute {
        #[arg(long, value_parser = parse_address_arg)]
        wallet: Address,
        #[arg(value_parser = parse_amount)]
        supply: U256,
    },
    /// Owner-only: mint whole tokens from a capped pool
    Mint {
        #[arg(long, value_enum)]
        pool: MintPool,
        #[arg(long, value_parser = parse_address_arg)]
        to: Address,
        #[arg(value_parser = parse_amount)]
        amount: U256,
    },
    /// Claim the signer's allocation from the local tree
    Claim,
}

#[derive(Debug, Subcommand)]
enum AirdropCommand {
    Status,
    Pause,
    Unpause,
    CheckAllowance {
        #[arg(long, value_parser = parse_address_arg)]
        owner: Option<Address>,
    },
    /// Owner-only: sweep tokens held by the airdrop
    Recover {
        /// Token to recover; defaults to the MemeTV token
        #[arg(long, value_parser = parse_address_arg)]
        token: Option<Address>,
        /// Receiver; defaults to the signer
        #[arg(long, value_parser = parse_address_arg)]
        to: Option<Address>,
    },
}

#[derive(Debug, Subcommand)]
enum TreeCommand {
    /// Build a claim tree from [{ "address", "amount" }]
    Build {
        #[arg(long)]
        input: PathBuf,
        /// Defaults to the configured tree path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Root,
    Proof {
        #[arg(long, value_parser = parse_address_arg)]
        address: Address,
    },
    Verify,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }

    if let Err(err) = run(Args::parse()).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let command = match args.command {
        Command::Tree { command } => return run_tree(&command, &config),
        command => command,
    };

    let settings = ChainSettings::from_env(args.network.as_deref())?;
    info!(network = %settings.network, "Using network {}", settings.network);
    let client = AlloyClient::connect(&settings).await?;
    let ctx = Context::new(&client, settings.network, &config)
        .with_native_symbol(settings.token_symbol.clone())
        .with_dry_run(args.dry_run);

    match command {
        Command::Deploy => {
            modules::deploy::run(&ctx).await?;
        }
        Command::UpdateRoot { token } => {
            modules::merkle_root::run(&ctx, token).await?;
        }
        Command::BulkTransfer {
            recipients,
            airdrop,
            token,
        } => {
            let path = recipients.unwrap_or_else(|| config.recipients_path.clone());
            bulk_transfer::run(&ctx, &path, bulk_transfer::Targets { airdrop, token }).await?;
        }
        Command::Token { address, command } => run_token(&ctx, address, command).await?,
        Command::Airdrop { address, command } => run_airdrop(&ctx, address, command).await?,
        Command::Tree { .. } => {}
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_file(path)?,
        None => config::load()?,
    };
    if let Some(tree) = &args.tree {
        config.tree_path = tree.clone();
    }
    if let Some(dir) = &args.deployments_dir {
        config.deployments_dir = dir.clone();
    }
    if let Some(dir) = &args.artifacts_dir {
        config.artifacts_dir = dir.clone();
    }
    Ok(config)
}

fn run_tree(command: &TreeCommand, config: &Config) -> Result<()> {
    use modules::tree;

    match command {
        TreeCommand::Build { input, output } => {
            let output = output.clone().unwrap_or_else(|| config.tree_path.clone());
            tree::build(input, &output)?;
        }
        TreeCommand::Root => println!("{}", tree::root(&config.tree_path)?),
        TreeCommand::Proof { address } => {
            let proof = tree::proof(&config.tree_path, *address)?;
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        TreeCommand::Verify => {
            tree::verify(&config.tree_path)?;
        }
    }
    Ok(())
}

async fn run_token(ctx: &Context<'_>, token: Option<Address>, command: TokenCommand) -> Result<()> {
    use modules::token;

    match command {
        TokenCommand::Status => {
            token::status(ctx, token).await?;
        }
        TokenCommand::Balance { account } => {
            token::balance(ctx, token, account).await?;
        }
        TokenCommand::Allowance { owner, spender } => {
            token::allowance(ctx, token, owner, spender).await?;
        }
        TokenCommand::Approve { amount, spender } => {
            token::change_allowance(ctx, token, AllowanceChange::Approve, spender, amount).await?;
        }
        TokenCommand::IncreaseAllowance { amount, spender } => {
            token::change_allowance(ctx, token, AllowanceChange::Increase, spender, amount).await?;
        }
        TokenCommand::DecreaseAllowance { amount, spender } => {
            token::change_allowance(ctx, token, AllowanceChange::Decrease, spender, amount).await?;
        }
        TokenCommand::Distribute { wallet, supply } => {
            token::distribute(ctx, token, wallet, supply).await?;
        }
        TokenCommand::Mint { pool, to, amount } => {
            token::mint(ctx, token, pool, to, amount).await?;
        }
        TokenCommand::Claim => {
            token::claim(ctx, token).await?;
        }
    }
    Ok(())
}

async fn run_airdrop(
    ctx: &Context<'_>,
    airdrop: Option<Address>,
    command: AirdropCommand,
) -> Result<()> {
    use modules::airdrop as ops;

    match command {
        AirdropCommand::Status => {
            ops::status(ctx, airdrop).await?;
        }
        AirdropCommand::Pause => {
            ops::pause(ctx, airdrop).await?;
        }
        AirdropCommand::Unpause => {
            ops::unpause(ctx, airdrop).await?;
        }
        AirdropCommand::CheckAllowance { owner } => {
            ops::check_allowance(ctx, airdrop, owner).await?;
        }
        AirdropCommand::Recover { token, to } => {
            ops::recover(ctx, airdrop, token, to).await?;
        }
    }
    Ok(())
}
