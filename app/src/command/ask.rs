//! Question answering, one-shot or as an interactive query loop.

use std::io::{Read, Write};
use std::pin::pin;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::runtime::Handle;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;
use wikibot_config::{Config, SessionConfig};
use wikibot_core::{ActionError, ActionOutcome, AnchorSearch, Dispatcher, tokenize_query};

use super::build_dispatcher;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub config: Config,
    /// Optional single query (non-interactive mode)
    pub message: Option<String>,
    /// Overrides `matching.anchor_search` from the config file
    pub anchor_search: Option<AnchorSearch>,
}

/// Strategy for executing the Ask command.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let dispatcher = build_dispatcher(&input.config, input.anchor_search)?;
        let mut stdout = std::io::stdout();

        if let Some(message) = input.message {
            if let ActionOutcome::Values(answers) = answer(&dispatcher, &message).await? {
                for answer in answers {
                    writeln!(stdout, "{answer}")?;
                }
            }
            return Ok(());
        }

        let session = QueryLoop::new(&dispatcher, &input.config.session);
        session
            .run(stdin_reader(), stdout, interrupted())
            .await
    }
}

/// Stdin fed from a plain thread, so a pending read never holds up runtime
/// shutdown after Ctrl-C.
fn stdin_reader() -> BufReader<DuplexStream> {
    let (mut writer, reader) = tokio::io::duplex(4096);
    let handle = Handle::current();
    std::thread::spawn(move || {
        let mut stdin = std::io::stdin().lock();
        let mut buf = [0_u8; 1024];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if handle.block_on(writer.write_all(&buf[..n])).is_err() {
                        break;
                    }
                }
            }
        }
    });
    BufReader::new(reader)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Tokenize and dispatch one query inside its own span.
async fn answer(dispatcher: &Dispatcher, text: &str) -> Result<ActionOutcome, ActionError> {
    let query = tokenize_query(text);
    let span = info_span!("query", id = %Uuid::now_v7());
    dispatcher.dispatch(&query).instrument(span).await
}

/// Read queries line by line until EOF or a rule asks to terminate.
pub struct QueryLoop<'a> {
    dispatcher: &'a Dispatcher,
    session: &'a SessionConfig,
}

impl<'a> QueryLoop<'a> {
    pub const fn new(dispatcher: &'a Dispatcher, session: &'a SessionConfig) -> Self {
        Self {
            dispatcher,
            session,
        }
    }

    /// Run the session until EOF, `bye`, or `interrupt` resolves.
    ///
    /// The farewell is printed however the session ends.
    pub async fn run<R, W, F>(&self, mut input: R, mut out: W, interrupt: F) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        F: Future<Output = ()>,
    {
        let mut interrupt = pin!(interrupt);
        writeln!(out, "{}", self.session.welcome)?;

        let mut turns = 0_usize;
        loop {
            writeln!(out)?;
            write!(out, "{}", self.session.prompt)?;
            out.flush()?;

            let mut raw = Vec::new();
            let read = tokio::select! {
                read = input.read_until(b'\n', &mut raw) => read?,
                () = &mut interrupt => {
                    info!("Interrupted while waiting for a query");
                    break;
                }
            };
            if read == 0 {
                break;
            }
            turns += 1;

            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping query that is not valid UTF-8: {e}");
                    writeln!(out, "Error: query is not valid UTF-8")?;
                    continue;
                }
            };

            let outcome = tokio::select! {
                outcome = answer(self.dispatcher, &line) => outcome,
                () = &mut interrupt => {
                    info!("Interrupted while answering a query");
                    break;
                }
            };

            match outcome {
                Ok(ActionOutcome::Values(answers)) => {
                    for answer in answers {
                        writeln!(out, "{answer}")?;
                    }
                }
                Ok(ActionOutcome::Terminate) => break,
                Err(e) => {
                    warn!("Query failed: {e}");
                    writeln!(out, "Error: {e}")?;
                }
            }
        }

        info!("Session ended after {turns} quer(ies)");
        writeln!(out, "\n{}\n", self.session.farewell)?;
        Ok(())
    }
}
