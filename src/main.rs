//! Command-line client for the payment gateway.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use weixin_pay::adapters::http::ReqwestTransport;
use weixin_pay::application::handlers::order::{
    CloseOrderCommand, CloseOrderHandler, QueryOrderHandler, QueryOrderQuery,
};
use weixin_pay::config::AppConfig;
use weixin_pay::domain::order::GatewayReply;

#[derive(Parser)]
#[command(name = "weixin-pay")]
#[command(about = "Sign and send WeChat Pay merchant requests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a native payment QR-code link
    QrLink {
        /// Merchant product id
        product_id: String,
    },

    /// Query an order
    Query {
        /// Merchant order id
        #[arg(long, conflicts_with = "transaction_id", required_unless_present = "transaction_id")]
        out_trade_no: Option<String>,

        /// Gateway transaction id
        #[arg(long)]
        transaction_id: Option<String>,
    },

    /// Close an unpaid order
    Close {
        /// Merchant order id
        out_trade_no: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.gateway.log_level)),
        )
        .init();

    config.validate().context("Invalid configuration")?;

    let merchant = Arc::new(config.merchant.to_merchant());
    let transport = Arc::new(ReqwestTransport::new());
    let endpoints = config.gateway.endpoints();

    match cli.command {
        Commands::QrLink { product_id } => {
            println!("{}", merchant.qr_link(&product_id));
        }
        Commands::Query {
            out_trade_no,
            transaction_id,
        } => {
            let query = match (out_trade_no, transaction_id) {
                (Some(id), _) => QueryOrderQuery::by_out_trade_no(id),
                (None, Some(id)) => QueryOrderQuery::by_transaction_id(id),
                (None, None) => anyhow::bail!("either --out-trade-no or --transaction-id is required"),
            };
            let handler = QueryOrderHandler::new(merchant, transport, endpoints);
            let result = handler.handle(query).await?;
            let pay = &result.pay_result;

            if !pay.is_success() {
                anyhow::bail!("gateway error: {}", pay.return_msg().unwrap_or("unknown"));
            }
            println!(
                "trade_state={} total_fee={} transaction_id={}",
                pay.trade_state.as_deref().unwrap_or("-"),
                pay.total_fee.as_deref().unwrap_or("-"),
                pay.transaction_id.as_deref().unwrap_or("-"),
            );
        }
        Commands::Close { out_trade_no } => {
            let handler = CloseOrderHandler::new(merchant, transport, endpoints);
            let response = handler.handle(CloseOrderCommand { out_trade_no }).await?;

            if !response.is_business_success() {
                anyhow::bail!(
                    "close failed: {}",
                    response
                        .err_code_des
                        .as_deref()
                        .or(response.error_code())
                        .or(response.return_msg())
                        .unwrap_or("unknown")
                );
            }
            println!("closed");
        }
    }

    Ok(())
}
