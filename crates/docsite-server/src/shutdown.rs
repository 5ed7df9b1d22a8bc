//! Graceful shutdown coordination.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Notify, broadcast};

/// Broadcasts a shutdown request to the accept loop and open connections
///
/// Cloning shares the same channel.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use docsite_server::ShutdownCoordinator;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
/// let mut rx = coordinator.subscribe();
///
/// coordinator.shutdown();
/// assert!(rx.recv().await.is_ok());
/// assert!(coordinator.is_shutting_down());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
	sender: broadcast::Sender<()>,
	shutting_down: Arc<AtomicBool>,
	complete: Arc<Notify>,
	completed: Arc<AtomicBool>,
	timeout: Duration,
}

impl ShutdownCoordinator {
	/// `timeout` bounds how long [`ShutdownCoordinator::wait_for_shutdown`]
	/// waits for the server to stop.
	pub fn new(timeout: Duration) -> Self {
		let (sender, _) = broadcast::channel(1);
		Self {
			sender,
			shutting_down: Arc::new(AtomicBool::new(false)),
			complete: Arc::new(Notify::new()),
			completed: Arc::new(AtomicBool::new(false)),
			timeout,
		}
	}

	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.sender.subscribe()
	}

	/// Requests shutdown. Calling it again has no further effect.
	pub fn shutdown(&self) {
		if !self.shutting_down.swap(true, Ordering::SeqCst) {
			tracing::info!("shutdown requested");
			// No receivers just means nothing is running yet.
			let _ = self.sender.send(());
		}
	}

	pub fn is_shutting_down(&self) -> bool {
		self.shutting_down.load(Ordering::SeqCst)
	}

	/// Called by the server once it has stopped accepting connections.
	pub fn notify_shutdown_complete(&self) {
		self.completed.store(true, Ordering::SeqCst);
		self.complete.notify_waiters();
	}

	/// Waits for [`ShutdownCoordinator::notify_shutdown_complete`], at most
	/// for the configured timeout. Returns `false` on timeout.
	pub async fn wait_for_shutdown(&self) -> bool {
		let notified = self.complete.notified();
		if self.completed.load(Ordering::SeqCst) {
			return true;
		}
		match tokio::time::timeout(self.timeout, notified).await {
			Ok(()) => true,
			Err(_) => {
				tracing::warn!(timeout = ?self.timeout, "server did not stop in time");
				false
			}
		}
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = tokio::signal::ctrl_c().await {
			tracing::error!(%err, "failed to listen for Ctrl-C");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(err) => {
				tracing::error!(%err, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => tracing::info!("received Ctrl-C"),
		_ = terminate => tracing::info!("received SIGTERM"),
	}
}
