use crate::browser::BrowserError;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

const PROMPT: &str =
    "Please complete the verification and close any popups manually, then press Enter to continue...";

/// A one-time wait for a person at the console
#[async_trait]
pub trait OperatorCheckpoint: Send {
    async fn wait_for_operator(&mut self) -> Result<(), BrowserError>;
}

/// Prints a prompt and waits for one line of input
pub struct LineCheckpoint<R> {
    input: R,
}

impl LineCheckpoint<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LineCheckpoint<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> OperatorCheckpoint for LineCheckpoint<R> {
    async fn wait_for_operator(&mut self) -> Result<(), BrowserError> {
        print!("{} ", PROMPT);
        std::io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            tracing::warn!("Operator input closed, continuing without confirmation");
        }
        Ok(())
    }
}
