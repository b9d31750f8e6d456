//! SD card script storage.
//!
//! SPI-attached card with a FAT filesystem, driven through
//! embedded-sdmmc's raw handle API. The volume is mounted lazily on
//! first use and dropped again when the card goes away, so pulling and
//! reinserting the card recovers without a reboot.

use core::fmt::Write as _;

use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::{
    Error as SdError, Mode, RawDirectory, RawFile, RawVolume, SdCard, TimeSource, Timestamp,
    VolumeIdx, VolumeManager,
};
use heapless::String;

use crate::config::NAME_MAX;
use crate::error::StorageError;
use crate::storage::{DirEntry, DirListing, EntryKind, LineRead, Storage};

/// Scripts are read-only; nothing we write ever needs a timestamp.
struct NoClock;

impl TimeSource for NoClock {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 0,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

type SpiDev = ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, Delay>;
type Card = SdCard<SpiDev, Delay>;
type Volumes = VolumeManager<Card, NoClock>;

/// Bytes fetched from the card per refill while reading a script.
const READ_CHUNK: usize = 64;

struct OpenScript {
    file: RawFile,
    buf: [u8; READ_CHUNK],
    start: usize,
    end: usize,
    eof: bool,
}

pub struct SdStorage {
    volumes: Volumes,
    mounted: Option<RawVolume>,
    open: Option<OpenScript>,
}

impl SdStorage {
    pub fn new(spi: Spim<'static, SPI3>, cs: Output<'static>) -> Self {
        let device = match ExclusiveDevice::new(spi, cs, Delay) {
            Ok(device) => device,
            Err(e) => match e {},
        };
        Self {
            volumes: VolumeManager::new(SdCard::new(device, Delay), NoClock),
            mounted: None,
            open: None,
        }
    }

    fn volume(&mut self) -> Result<RawVolume, StorageError> {
        if let Some(volume) = self.mounted {
            return Ok(volume);
        }
        match self.volumes.open_raw_volume(VolumeIdx(0)) {
            Ok(volume) => {
                info!("SD card mounted");
                self.mounted = Some(volume);
                Ok(volume)
            }
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    /// Open the directory at `path`, one component at a time, closing
    /// each parent as we descend.
    fn walk(&mut self, volume: RawVolume, path: &str) -> Result<RawDirectory, StorageError> {
        let mut dir = self.volumes.open_root_dir(volume).map_err(dir_error)?;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            match self.volumes.open_dir(dir, component) {
                Ok(child) => {
                    let _ = self.volumes.close_dir(dir);
                    dir = child;
                }
                Err(e) => {
                    let _ = self.volumes.close_dir(dir);
                    return Err(dir_error(e));
                }
            }
        }
        Ok(dir)
    }

    /// Drop everything so the next access remounts from scratch.
    fn unmount(&mut self) {
        self.close();
        if let Some(volume) = self.mounted.take() {
            let _ = self.volumes.close_volume(volume);
            info!("SD card unmounted");
        }
    }

    fn bail(&mut self, e: StorageError) -> StorageError {
        if matches!(e, StorageError::Unavailable) {
            self.unmount();
        }
        e
    }
}

impl Storage for SdStorage {
    fn list(&mut self, path: &str) -> Result<DirListing, StorageError> {
        let volume = self.volume()?;
        let dir = match self.walk(volume, path) {
            Ok(dir) => dir,
            Err(e) => return Err(self.bail(e)),
        };

        let mut listing = DirListing::new();
        let result = self.volumes.iterate_dir(dir, |entry| {
            if entry.attributes.is_lfn() || entry.attributes.is_volume() {
                return;
            }
            let mut name: String<NAME_MAX> = String::new();
            let _ = write!(name, "{}", entry.name);
            let kind = if entry.attributes.is_directory() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            if listing.push(DirEntry { name, kind }).is_err() {
                warn!("directory overflows the listing, entry dropped");
            }
        });
        let _ = self.volumes.close_dir(dir);

        match result {
            Ok(()) => Ok(listing),
            Err(e) => Err(self.bail(dir_error(e))),
        }
    }

    fn open(&mut self, path: &str) -> Result<u32, StorageError> {
        self.close();
        let volume = self.volume()?;
        let (dir_path, file_name) = split_path(path);
        let dir = match self.walk(volume, dir_path) {
            Ok(dir) => dir,
            Err(e) => return Err(self.bail(e)),
        };
        let file = match self.volumes.open_file_in_dir(dir, file_name, Mode::ReadOnly) {
            Ok(file) => file,
            Err(e) => {
                let _ = self.volumes.close_dir(dir);
                return Err(self.bail(file_error(e)));
            }
        };
        let _ = self.volumes.close_dir(dir);
        let total = match self.volumes.file_length(file) {
            Ok(total) => total,
            Err(e) => {
                let _ = self.volumes.close_file(file);
                return Err(self.bail(file_error(e)));
            }
        };
        self.open = Some(OpenScript {
            file,
            buf: [0; READ_CHUNK],
            start: 0,
            end: 0,
            eof: false,
        });
        Ok(total)
    }

    fn read_line(&mut self, out: &mut [u8]) -> Result<Option<LineRead>, StorageError> {
        let Some(script) = self.open.as_mut() else {
            return Err(StorageError::Read);
        };
        let mut len = 0usize;
        let mut consumed = 0u32;
        loop {
            if script.start == script.end && !script.eof {
                match self.volumes.read(script.file, &mut script.buf) {
                    Ok(0) => script.eof = true,
                    Ok(n) => {
                        script.start = 0;
                        script.end = n;
                    }
                    Err(SdError::EndOfFile) => script.eof = true,
                    Err(e) => return Err(file_error(e)),
                }
            }
            if script.start == script.end {
                break;
            }
            let byte = script.buf[script.start];
            script.start += 1;
            consumed += 1;
            if byte == b'\n' {
                return Ok(Some(LineRead { len, consumed }));
            }
            if len < out.len() {
                out[len] = byte;
                len += 1;
            }
        }
        if consumed > 0 {
            Ok(Some(LineRead { len, consumed }))
        } else {
            Ok(None)
        }
    }

    fn close(&mut self) {
        if let Some(script) = self.open.take() {
            let _ = self.volumes.close_file(script.file);
        }
    }
}

fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}

fn dir_error<E: core::fmt::Debug>(e: SdError<E>) -> StorageError {
    match e {
        SdError::NotFound => StorageError::NotFound,
        SdError::DeviceError(_) => StorageError::Unavailable,
        _ => StorageError::DirectoryRead,
    }
}

fn file_error<E: core::fmt::Debug>(e: SdError<E>) -> StorageError {
    match e {
        SdError::NotFound => StorageError::NotFound,
        SdError::DeviceError(_) => StorageError::Unavailable,
        _ => StorageError::Read,
    }
}
