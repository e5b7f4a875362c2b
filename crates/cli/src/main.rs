//! Command line interface for the stock quote service.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::sync::Arc;
use stockq_api::models::StockEntry;
use stockq_api::{ApiServer, FetchWindow, QuoteService, ServerConfig};
use stockq_data::providers::{YahooFinanceConfig, YahooFinanceProvider};
use stockq_domain::enums::{Interval, Period};
use stockq_domain::indicators::{IndicatorParams, MacdParams};
use stockq_domain::value_objects::Symbol;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockq")]
#[command(about = "Stock quote and technical indicator service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides STOCKQ_BIND)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides STOCKQ_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the latest price of one or more symbols
    Quote {
        /// Ticker symbols (e.g., AAPL MSFT)
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Print the latest RSI and MACD readings
    Indicators {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,

        /// RSI lookback
        #[arg(long, default_value_t = 14)]
        rsi_period: usize,

        /// MACD fast EMA span
        #[arg(long, default_value_t = 12)]
        fast: usize,

        /// MACD slow EMA span
        #[arg(long, default_value_t = 26)]
        slow: usize,

        /// MACD signal EMA span
        #[arg(long, default_value_t = 9)]
        signal: usize,
    },
    /// Print an intraday price series
    Intraday {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,

        /// Lookback range (e.g., 1d, 5d)
        #[arg(long)]
        period: Option<Period>,

        /// Bar interval (e.g., 1m, 5m)
        #[arg(long)]
        interval: Option<Interval>,
    },
}

fn quote_service(config: &ServerConfig) -> Result<QuoteService> {
    let provider = YahooFinanceProvider::new(
        YahooFinanceConfig::default()
            .with_base_url(&config.provider_url)
            .with_timeout(config.provider_timeout),
    )?;
    Ok(QuoteService::new(Arc::new(provider)))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }

            info!(bind = %config.bind, port = config.port, "Starting API server");
            ApiServer::with_yahoo(config)?
                .run()
                .await
                .context("API server failed")?;
        }
        Commands::Quote { symbols } => {
            let service = quote_service(&config)?;
            let batch = service
                .batch_prices(&symbols, config.quote_window, config.max_batch)
                .await?;

            println!("{:<10} | {:>12}", "Symbol", "Price");
            println!("{}", "-".repeat(25));
            for (symbol, entry) in batch {
                match entry {
                    StockEntry::Price { price } => {
                        println!("{symbol:<10} | {price:>12.4}")
                    }
                    StockEntry::Error { error } => {
                        println!("{symbol:<10} | {error}")
                    }
                }
            }
        }
        Commands::Indicators {
            symbol,
            rsi_period,
            fast,
            slow,
            signal,
        } => {
            let service = quote_service(&config)?;
            let symbol = Symbol::new(&symbol)?;
            let params = IndicatorParams {
                rsi_period,
                macd: MacdParams { fast, slow, signal },
            };

            let result = service
                .indicators(&symbol, config.indicator_window, &params)
                .await?;

            println!("📊 {symbol} ({})", config.indicator_window.period);
            match result.rsi {
                Some(rsi) => println!("RSI({rsi_period}):   {rsi:.2}"),
                None => println!("RSI({rsi_period}):   n/a (not enough history)"),
            }
            match result.macd {
                Some(m) => {
                    println!("MACD:      {:.4}", m.macd);
                    println!("Signal:    {:.4}", m.signal);
                    println!("Histogram: {:.4}", m.histogram);
                }
                None => println!("MACD:      n/a"),
            }
        }
        Commands::Intraday {
            symbol,
            period,
            interval,
        } => {
            let service = quote_service(&config)?;
            let symbol = Symbol::new(&symbol)?;
            let default = config.intraday_window;
            let window = FetchWindow::new(
                period.unwrap_or(default.period),
                interval.unwrap_or(default.interval),
            );

            let chart = service.intraday(&symbol, window).await?;

            println!("✅ {} points for {symbol}:", chart.prices.len());
            println!("{:<12} | {:>12}", "Time", "Close");
            println!("{}", "-".repeat(27));
            for (time, price) in chart.times.iter().zip(&chart.prices) {
                println!("{time:<12} | {price:>12.4}");
            }
        }
    }

    Ok(())
}
