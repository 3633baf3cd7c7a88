//! Main application orchestration.
//!
//! Owns the two browser sessions and the refresh loop:
//! - a stealth session that scrapes the ranked gainers table
//! - the wall session whose document hosts the paged panel grid
//!
//! Both sessions come up before the manual login gate so the operator can
//! act in the browser they see. After login, the loop alternates between
//! one refresh cycle and an idle period with liveness probes. An empty
//! fetch keeps the previous wall; only a dead wall session ends the run.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use chartwall_core::{allocate, GridDims};
use chartwall_driver::{HostSurface, PanelAccess, Session, SessionConfig};
use chartwall_grid::{CycleReport, GridEngine, PanelUpdater, Sanitizer};
use chartwall_source::{GainersSource, SymbolSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Lifecycle phase of the wall application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sessions are up; waiting for the operator to log in.
    AwaitingManualLogin,
    /// Refresh cycles are running.
    Running,
    /// Shutdown has begun.
    Stopped,
}

/// Main application.
pub struct Application {
    config: AppConfig,
    dims: GridDims,
    phase: Phase,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let dims = config
            .grid
            .dims()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            dims,
            phase: Phase::AwaitingManualLogin,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the application until shutdown or wall-session loss.
    pub async fn run(mut self) -> AppResult<()> {
        let shutdown = CancellationToken::new();
        spawn_signal_listener(shutdown.clone());

        let wall_cfg = SessionConfig::wall(
            &self.config.webdriver_url,
            Some(self.config.user_data_dir.clone()),
        );
        let wall = Session::connect(wall_cfg).await?;
        info!("Wall session connected");

        let source_session = match Session::connect(SessionConfig::stealth(
            &self.config.webdriver_url,
        ))
        .await
        {
            Ok(session) => session,
            Err(e) => {
                let _ = wall.close().await;
                return Err(e.into());
            }
        };
        info!("Source session connected");

        if let Err(e) = wall.goto(&self.config.wall_url).await {
            let _ = source_session.close().await;
            let _ = wall.close().await;
            return Err(e.into());
        }

        let source = GainersSource::new(source_session, self.config.source.clone());
        let mut engine = GridEngine::new(
            wall,
            self.dims,
            self.config.layout.clone(),
            PanelUpdater::new(self.config.filter.clone(), self.config.updater.clone()),
            Sanitizer::new(self.config.sanitizer.clone()),
        );

        let result = self.drive(&source, &mut engine, &shutdown).await;

        self.phase = Phase::Stopped;
        info!("Shutting down");
        if let Err(e) = source.into_inner().close().await {
            warn!(error = %e, "Source session close failed");
        }
        if let Err(e) = engine.into_driver().close().await {
            warn!(error = %e, "Wall session close failed");
        }

        result
    }

    /// The login gate and refresh loop.
    async fn drive(
        &mut self,
        source: &GainersSource<Session>,
        engine: &mut GridEngine<Session>,
        shutdown: &CancellationToken,
    ) -> AppResult<()> {
        if !self.await_login(shutdown).await? {
            return Ok(());
        }
        self.phase = Phase::Running;
        info!(
            refresh_secs = self.config.refresh_interval_secs,
            fetch_limit = self.config.fetch_limit,
            dims = %self.dims,
            "Starting refresh cycles"
        );

        let mut cycle_count = 0u64;
        loop {
            match run_refresh_cycle(source, engine, self.config.fetch_limit).await {
                Ok(Some(report)) => {
                    cycle_count += 1;
                    debug!(cycle = cycle_count, updated = report.updated, "Cycle finished");
                }
                Ok(None) => {}
                Err(e) => {
                    if !engine.driver().is_alive().await {
                        error!("Wall session stopped responding");
                        return Err(AppError::SessionTerminated);
                    }
                    error!(error = %e, "Cycle failed, retrying next interval");
                }
            }

            drain_wall_console(engine.driver()).await;

            if !self.idle(engine.driver(), shutdown).await? {
                info!(cycles = cycle_count, "Refresh loop ended");
                return Ok(());
            }
        }
    }

    /// Hold until the operator confirms login in the wall browser. Returns
    /// false when shutdown was requested instead.
    async fn await_login(&self, shutdown: &CancellationToken) -> AppResult<bool> {
        info!(
            url = %self.config.wall_url,
            "Log in to the wall site in the opened browser, then press Enter"
        );

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        tokio::select! {
            read = reader.read_line(&mut line) => {
                read?;
                info!("Login confirmed");
                Ok(true)
            }
            _ = shutdown.cancelled() => Ok(false),
        }
    }

    /// Sleep out the refresh interval, probing wall-session liveness at the
    /// configured cadence. Returns false when shutdown was requested.
    async fn idle(&self, wall: &Session, shutdown: &CancellationToken) -> AppResult<bool> {
        let deadline = Instant::now() + self.config.refresh_interval();
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(true);
            }
            let nap = self.config.liveness_probe().min(deadline - now);
            tokio::select! {
                _ = sleep(nap) => {
                    if !wall.is_alive().await {
                        error!("Wall session stopped responding");
                        return Err(AppError::SessionTerminated);
                    }
                }
                _ = shutdown.cancelled() => return Ok(false),
            }
        }
    }
}

/// Fetch ranked symbols and project them onto the wall.
///
/// Returns `None` for an empty fetch: the wall keeps its previous symbols
/// rather than going blank.
pub async fn run_refresh_cycle<S, D>(
    source: &S,
    engine: &mut GridEngine<D>,
    limit: usize,
) -> AppResult<Option<CycleReport>>
where
    S: SymbolSource + ?Sized,
    D: HostSurface + PanelAccess,
{
    let batch = source.fetch_top(limit).await;
    if batch.is_empty() {
        warn!("No symbols fetched, keeping previous wall state");
        return Ok(None);
    }
    info!(count = batch.len(), age_ms = batch.age_ms(), "Symbols fetched");

    let alloc = allocate(batch.symbols(), engine.dims());
    let report = engine.run_cycle(&alloc).await?;
    Ok(Some(report))
}

/// Pull buffered console entries out of the wall page and surface errors.
async fn drain_wall_console(wall: &Session) {
    match wall.drain_console().await {
        Ok(entries) => {
            for entry in entries {
                if entry.is_error() {
                    warn!(text = %entry.text, "Wall console error");
                } else {
                    debug!(text = %entry.text, "Wall console");
                }
            }
        }
        Err(e) => debug!(error = %e, "Console drain failed"),
    }
}

fn spawn_signal_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            token.cancel();
        }
    });
}
