//! Device transport port

use std::fs;
use std::path::PathBuf;

use super::cdb::Cdb;
use crate::error::{Result, TransportError};

/// Logical sector size used to size vendor transfers
pub const SECTOR_SIZE: usize = 512;

/// Data phase direction of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to host
    In,
    /// Host to device
    Out,
}

/// A device that accepts raw SCSI commands
///
/// Implementations own the device handle and release it on drop, so a
/// transport value is the scoped resource for one run.
pub trait ScsiTransport {
    /// Issue `cdb` with `buf` as the data phase
    ///
    /// Returns the number of bytes actually transferred. For `Direction::In`
    /// bytes past that count are left as they were.
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> std::result::Result<usize, TransportError>;

    /// Device capacity in bytes
    fn capacity(&mut self) -> std::result::Result<u64, TransportError>;
}

impl<T: ScsiTransport + ?Sized> ScsiTransport for &mut T {
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> std::result::Result<usize, TransportError> {
        (**self).send(cdb, buf, direction)
    }

    fn capacity(&mut self) -> std::result::Result<u64, TransportError> {
        (**self).capacity()
    }
}

impl<T: ScsiTransport + ?Sized> ScsiTransport for Box<T> {
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> std::result::Result<usize, TransportError> {
        (**self).send(cdb, buf, direction)
    }

    fn capacity(&mut self) -> std::result::Result<u64, TransportError> {
        (**self).capacity()
    }
}

/// Issue a data-in command and return a `len` byte response buffer
pub fn request<D: ScsiTransport + ?Sized>(dev: &mut D, cdb: &Cdb, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    log::trace!("scsi: -> [{}] in={}", cdb, len);
    let transferred = dev.send(cdb, &mut buf, Direction::In)?;
    if transferred < len {
        log::trace!(
            "scsi: <- 0x{:02X} short transfer ({} of {} bytes)",
            cdb.opcode(),
            transferred,
            len
        );
    }
    Ok(buf)
}

/// Transport decorator that saves every data-in response to a directory
///
/// Files are named after the first two CDB bytes, e.g. `FA0E.bin`. Write
/// failures are logged and otherwise ignored.
pub struct DumpTransport<T> {
    inner: T,
    dir: PathBuf,
}

impl<T: ScsiTransport> DumpTransport<T> {
    /// Wrap `inner`, dumping into `dir` (created on first use)
    pub fn new(inner: T, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    /// Unwrap the inner transport
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn dump(&self, cdb: &Cdb, data: &[u8]) {
        let bytes = cdb.as_bytes();
        let path = self
            .dir
            .join(format!("{:02X}{:02X}.bin", bytes[0], bytes[1]));
        let result = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, data));
        match result {
            Ok(()) => log::debug!("dump: wrote {}", path.display()),
            Err(e) => log::warn!("dump: failed to write {}: {}", path.display(), e),
        }
    }
}

impl<T: ScsiTransport> ScsiTransport for DumpTransport<T> {
    fn send(
        &mut self,
        cdb: &Cdb,
        buf: &mut [u8],
        direction: Direction,
    ) -> std::result::Result<usize, TransportError> {
        let n = self.inner.send(cdb, buf, direction)?;
        if direction == Direction::In {
            self.dump(cdb, buf);
        }
        Ok(n)
    }

    fn capacity(&mut self) -> std::result::Result<u64, TransportError> {
        self.inner.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scsi::CdbSize;

    struct Echo {
        capacity: u64,
    }

    impl ScsiTransport for Echo {
        fn send(
            &mut self,
            cdb: &Cdb,
            buf: &mut [u8],
            _direction: Direction,
        ) -> std::result::Result<usize, TransportError> {
            let n = buf.len().min(4);
            buf[..n].fill(cdb.opcode());
            Ok(n)
        }

        fn capacity(&mut self) -> std::result::Result<u64, TransportError> {
            Ok(self.capacity)
        }
    }

    #[test]
    fn test_request_keeps_full_buffer() {
        let mut dev = Echo { capacity: 0 };
        let cdb = Cdb::with_prefix(CdbSize::Cdb16, &[0x9A]);
        let data = request(&mut dev, &cdb, 8).unwrap();
        assert_eq!(data, vec![0x9A, 0x9A, 0x9A, 0x9A, 0, 0, 0, 0]);
    }

    #[test]
    fn test_dump_transport_writes_files() {
        let dir = std::env::temp_dir().join(format!("chipinfo-dump-{}", std::process::id()));
        let mut dev = DumpTransport::new(Echo { capacity: 42 }, &dir);

        let cdb = Cdb::with_prefix(CdbSize::Cdb16, &[0xFA, 0x0E]);
        request(&mut dev, &cdb, 4).unwrap();
        assert_eq!(dev.capacity().unwrap(), 42);

        let saved = fs::read(dir.join("FA0E.bin")).unwrap();
        assert_eq!(saved, vec![0xFA; 4]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
