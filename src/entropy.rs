//! Platform entropy seeding.
//!
//! [`EntropyProvider`] probes a priority-ordered list of qualitatively
//! different entropy sources, keeps the first one that is available and
//! permitted under the blocking policy, and reads 32-bit words from it.
//! Each candidate owns its own read protocol; `EntropyProvider` itself only
//! knows how to decode the resulting bytes as little-endian `u32`s.

use crate::error::RngError;
use std::io::Read;
use std::time::Duration;

#[cfg(unix)]
use std::io::Write;
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;

/// A single candidate entropy source.
pub trait EntropySource: Send + Sync {
    /// Human-readable source name, used in diagnostics and error messages.
    fn name(&self) -> &str;
    /// Whether reading from this source can block for an unbounded time.
    fn is_blocking(&self) -> bool;
    /// Whether this source is considered cryptographically strong.
    fn is_strong(&self) -> bool;
    /// Cheap availability check, performed once at provider construction.
    fn probe(&self) -> bool;
    /// Reads exactly `nbytes` bytes. Opens and releases any OS handle
    /// within this call.
    fn read(&self, nbytes: usize) -> Result<Vec<u8>, RngError>;
}

fn read_error(source: &str, reason: impl Into<String>) -> RngError {
    RngError::EntropyReadError {
        source_name: source.to_string(),
        reason: reason.into(),
    }
}

/// The host's cryptographic random API (`ring::rand::SystemRandom`).
/// Nonblocking, strong, always available.
struct OsCryptoSource {
    rng: ring::rand::SystemRandom,
}

impl OsCryptoSource {
    fn new() -> Self {
        Self {
            rng: ring::rand::SystemRandom::new(),
        }
    }
}

impl EntropySource for OsCryptoSource {
    fn name(&self) -> &str {
        "os-crypto-api"
    }

    fn is_blocking(&self) -> bool {
        false
    }

    fn is_strong(&self) -> bool {
        true
    }

    fn probe(&self) -> bool {
        true
    }

    fn read(&self, nbytes: usize) -> Result<Vec<u8>, RngError> {
        use ring::rand::SecureRandom;
        let mut buf = vec![0u8; nbytes];
        self.rng
            .fill(&mut buf)
            .map_err(|_| read_error(self.name(), "system random generation failed"))?;
        Ok(buf)
    }
}

#[cfg(unix)]
const EGD_PATHS: &[&str] = &[
    "/var/run/egd-pool",
    "/dev/egd-pool",
    "/etc/egd-pool",
    "/etc/entropy",
];

#[cfg(unix)]
const EGD_TIMEOUT: Duration = Duration::from_secs(1);

/// An Entropy Gathering Daemon UNIX socket. Blocking, strong. Tries each of
/// the four documented paths in turn; whichever answers first is used.
#[cfg(unix)]
struct EgdSource;

#[cfg(unix)]
impl EgdSource {
    /// Connects, sends the entropy-available query (`0x00`), and reads the
    /// 4-byte big-endian reply within a 1-second timeout.
    fn handshake(path: &Path) -> std::io::Result<u32> {
        let mut stream = UnixStream::connect(path)?;
        stream.set_read_timeout(Some(EGD_TIMEOUT))?;
        stream.set_write_timeout(Some(EGD_TIMEOUT))?;
        stream.write_all(&[0x00])?;
        let mut reply = [0u8; 4];
        stream.read_exact(&mut reply)?;
        Ok(u32::from_be_bytes(reply))
    }

    fn reachable_path() -> Option<&'static Path> {
        EGD_PATHS
            .iter()
            .map(Path::new)
            .find(|p| Self::handshake(p).is_ok())
    }

    fn connect_chunked(path: &Path, nbytes: usize) -> std::io::Result<Vec<u8>> {
        let mut stream = UnixStream::connect(path)?;
        stream.set_read_timeout(Some(EGD_TIMEOUT))?;
        stream.set_write_timeout(Some(EGD_TIMEOUT))?;

        let mut out = Vec::with_capacity(nbytes);
        while out.len() < nbytes {
            let chunk = (nbytes - out.len()).min(255) as u8;
            stream.write_all(&[0x02, chunk])?;
            let mut buf = vec![0u8; chunk as usize];
            stream.read_exact(&mut buf)?;
            out.extend_from_slice(&buf);
        }
        Ok(out)
    }
}

#[cfg(unix)]
impl EntropySource for EgdSource {
    fn name(&self) -> &str {
        "egd-socket"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_strong(&self) -> bool {
        true
    }

    fn probe(&self) -> bool {
        Self::reachable_path().is_some()
    }

    fn read(&self, nbytes: usize) -> Result<Vec<u8>, RngError> {
        let path = Self::reachable_path().ok_or_else(|| read_error(self.name(), "no EGD socket reachable"))?;
        Self::connect_chunked(path, nbytes).map_err(|e| read_error(self.name(), e.to_string()))
    }
}

/// A filesystem character device consulted for randomness, e.g.
/// `/dev/urandom` or `/dev/random`.
#[cfg(unix)]
struct DeviceSource {
    path: &'static str,
    blocking: bool,
    strong: bool,
}

#[cfg(unix)]
impl DeviceSource {
    const fn nonblocking() -> Self {
        Self {
            path: "/dev/urandom",
            blocking: false,
            strong: false,
        }
    }

    const fn blocking_device() -> Self {
        Self {
            path: "/dev/random",
            blocking: true,
            strong: true,
        }
    }
}

#[cfg(unix)]
impl EntropySource for DeviceSource {
    fn name(&self) -> &str {
        self.path
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn is_strong(&self) -> bool {
        self.strong
    }

    fn probe(&self) -> bool {
        std::fs::File::open(self.path)
            .and_then(|mut f| {
                let mut byte = [0u8; 1];
                f.read_exact(&mut byte)
            })
            .is_ok()
    }

    fn read(&self, nbytes: usize) -> Result<Vec<u8>, RngError> {
        let mut file =
            std::fs::File::open(self.path).map_err(|e| read_error(self.name(), e.to_string()))?;
        let mut out = vec![0u8; nbytes];
        let mut collected = 0;
        while collected < nbytes {
            let n = file
                .read(&mut out[collected..])
                .map_err(|e| read_error(self.name(), e.to_string()))?;
            if n == 0 {
                return Err(read_error(self.name(), "unexpected EOF"));
            }
            collected += n;
        }
        Ok(out)
    }
}

/// Options controlling entropy source selection.
#[derive(Debug, Clone, Copy)]
pub struct EntropyOptions {
    /// Skip sources classified as blocking. Default `true`.
    pub nonblocking: bool,
}

impl Default for EntropyOptions {
    fn default() -> Self {
        Self { nonblocking: true }
    }
}

/// Picks and holds exactly one entropy source, chosen once at construction.
pub struct EntropyProvider {
    source: Box<dyn EntropySource>,
}

impl EntropyProvider {
    /// Probes candidates in priority order (OS crypto API, EGD socket,
    /// nonblocking device, blocking device) and keeps the first one that is
    /// available and permitted under `options.nonblocking`.
    pub fn new(options: EntropyOptions) -> Result<Self, RngError> {
        for candidate in Self::candidates() {
            if options.nonblocking && candidate.is_blocking() {
                tracing::debug!(source = candidate.name(), "skipping blocking source");
                continue;
            }
            if candidate.probe() {
                tracing::info!(source = candidate.name(), "selected entropy source");
                return Ok(Self { source: candidate });
            }
            tracing::debug!(source = candidate.name(), "source unavailable");
        }

        Err(RngError::NoEntropySource {
            nonblocking: options.nonblocking,
        })
    }

    #[cfg(unix)]
    fn candidates() -> Vec<Box<dyn EntropySource>> {
        vec![
            Box::new(OsCryptoSource::new()),
            Box::new(EgdSource),
            Box::new(DeviceSource::nonblocking()),
            Box::new(DeviceSource::blocking_device()),
        ]
    }

    #[cfg(not(unix))]
    fn candidates() -> Vec<Box<dyn EntropySource>> {
        vec![Box::new(OsCryptoSource::new())]
    }

    /// The name of the source this provider settled on.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Reads `n` little-endian 32-bit words from the selected source.
    pub fn random_words(&self, n: usize) -> Result<Vec<u32>, RngError> {
        let bytes = self.source.read(n * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

#[cfg(test)]
#[path = "entropy_tests.rs"]
mod entropy_tests;
