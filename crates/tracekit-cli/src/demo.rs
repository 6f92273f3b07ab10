//! `tracekit demo`: a small instrumented type driven through every
//! interceptor, followed by lines bridged from `log` and `tracing`.

use std::sync::Arc;

use tracekit::prelude::*;
use tracekit::{LogBridge, TraceSubscriberBuilder};

#[derive(Debug, Instrument)]
#[instrument(param(1, redact))]
struct Inventory {
    owner: String,
    token: String,
    #[instrument(label = "stock", color = "yellow")]
    items: Traced<u32>,
}

impl Inventory {
    #[trace_constructor]
    fn open(owner: String, token: String) -> Self {
        Self {
            owner,
            token,
            items: Traced::member::<Inventory>("items", 0),
        }
    }

    #[trace_method]
    fn restock(&mut self, amount: u32) -> u32 {
        let stock = self.items.get() + amount;
        self.items.set(stock);
        stock
    }

    #[trace_method(label = "sell", color = "magenta")]
    fn take(&mut self, amount: u32) -> Result<u32, String> {
        let stock = self.items.get();
        if amount > stock {
            return Err(format!("only {stock} left"));
        }
        self.items.set(stock - amount);
        Ok(stock - amount)
    }
}

pub(crate) fn run(config: &TraceConfig) -> TraceResult<()> {
    let logger = init_logger(config)?;
    registry().install::<Inventory>()?;

    logger.log(Preset::Separator, ());
    logger.log(
        LogRequest::from(Preset::Invoked).with_color(Color::Blue),
        ["demo"],
    );

    let mut inventory = Inventory::open("ada".to_string(), "s3cr3t".to_string());
    inventory.restock(5);
    if let Ok(left) = inventory.take(3) {
        logger.log(Preset::Variable, Payload::slot("left", [left]));
    }
    if let Err(e) = inventory.take(10) {
        logger.log(ConsoleMethod::Warn, Payload::args([e]));
    }
    trace_log!(logger, Preset::Changed, inventory.owner, inventory.token.len());

    LogBridge::builder()
        .with_logger(Arc::clone(logger))
        .level_filter(config.level)
        .try_init();
    log::info!(target: "demo", "bridged from log");

    let subscriber = TraceSubscriberBuilder::new()
        .with_logger(Arc::clone(logger))
        .with_log_level(config.level)
        .build();
    let stock = inventory.items.with(|n| *n);
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "demo", stock, "bridged from tracing");
    });

    logger.green(["done"]);
    logger.log(Preset::Separator, ());
    Ok(())
}
