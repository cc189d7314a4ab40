//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - USB printers (bulk OUT endpoint, located by vendor/product ID)

use crate::error::{PrintError, PrintResult};
use rusb::{Device, DeviceHandle, Direction, GlobalContext, TransferType};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A printer that can be opened for exclusive, short-lived sessions
///
/// Implementations are blocking; async callers should run them on a
/// blocking thread.
pub trait PrinterDevice: Send + Sync + 'static {
    type Session: PrintSession + Send;

    /// Open an exclusive session on the printer
    fn open(&self) -> PrintResult<Self::Session>;

    /// Check if the printer is attached/reachable without opening it
    fn is_online(&self) -> bool;

    /// Human readable identity, used in logs and health output
    fn describe(&self) -> String;
}

/// An open connection to a printer
///
/// Dropping a session releases the device; `close` does the same but
/// reports release failures.
pub trait PrintSession {
    /// Send raw ESC/POS data to the printer
    fn write(&mut self, data: &[u8]) -> PrintResult<()>;

    /// Release the device
    fn close(self) -> PrintResult<()>
    where
        Self: Sized;
}

/// USB printer identified by vendor/product ID
#[derive(Debug, Clone)]
pub struct UsbPrinter {
    vendor_id: u16,
    product_id: u16,
    timeout: Duration,
}

impl UsbPrinter {
    /// Create a new USB printer handle (nothing is opened yet)
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            timeout: Duration::from_secs(5),
        }
    }

    /// Set bulk transfer timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a device descriptor's IDs identify this printer
    fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        vendor_id == self.vendor_id && product_id == self.product_id
    }

    /// Locate the printer on the bus without opening it
    fn find_device(&self) -> PrintResult<Device<GlobalContext>> {
        for device in rusb::devices()?.iter() {
            let Ok(descriptor) = device.device_descriptor() else {
                continue;
            };
            if self.matches(descriptor.vendor_id(), descriptor.product_id()) {
                return Ok(device);
            }
        }

        Err(PrintError::NotFound {
            vendor_id: self.vendor_id,
            product_id: self.product_id,
        })
    }

    /// Find the first bulk OUT endpoint of the active configuration
    ///
    /// Returns `(interface, alternate setting, endpoint address)`.
    fn find_bulk_out(&self, handle: &DeviceHandle<GlobalContext>) -> PrintResult<(u8, u8, u8)> {
        let config = handle.device().active_config_descriptor()?;

        for interface in config.interfaces() {
            for descriptor in interface.descriptors() {
                for endpoint in descriptor.endpoint_descriptors() {
                    if endpoint.direction() == Direction::Out
                        && endpoint.transfer_type() == TransferType::Bulk
                    {
                        return Ok((
                            descriptor.interface_number(),
                            descriptor.setting_number(),
                            endpoint.address(),
                        ));
                    }
                }
            }
        }

        Err(PrintError::NoBulkEndpoint(self.describe()))
    }
}

impl PrinterDevice for UsbPrinter {
    type Session = UsbSession;

    #[instrument(skip(self), fields(printer = %self.describe()))]
    fn open(&self) -> PrintResult<UsbSession> {
        // Open errors (Access, Busy, ...) surface as PrintError::Usb
        let mut handle = self.find_device()?.open()?;

        let (interface, setting, endpoint) = self.find_bulk_out(&handle)?;
        debug!(interface, setting, endpoint, "Bulk OUT endpoint located");

        // Not supported on every platform; treat errors as "no kernel driver"
        let kernel_driver = handle.kernel_driver_active(interface).unwrap_or(false);
        if kernel_driver {
            handle.detach_kernel_driver(interface)?;
        }

        if let Err(e) = handle.claim_interface(interface) {
            if kernel_driver {
                let _ = handle.attach_kernel_driver(interface);
            }
            return Err(e.into());
        }

        if setting != 0
            && let Err(e) = handle.set_alternate_setting(interface, setting)
        {
            warn!(error = %e, "Failed to select alternate setting");
        }

        info!("USB printer connected");

        Ok(UsbSession {
            handle,
            interface,
            endpoint,
            timeout: self.timeout,
            kernel_driver,
            released: false,
        })
    }

    fn is_online(&self) -> bool {
        match self.find_device() {
            Ok(_) => true,
            Err(PrintError::NotFound { .. }) => false,
            Err(e) => {
                warn!(error = %e, "USB enumeration failed");
                false
            }
        }
    }

    fn describe(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// Claimed USB interface of an open printer
///
/// The interface is released (and any detached kernel driver reattached)
/// when the session is closed or dropped.
pub struct UsbSession {
    handle: DeviceHandle<GlobalContext>,
    interface: u8,
    endpoint: u8,
    timeout: Duration,
    kernel_driver: bool,
    released: bool,
}

impl UsbSession {
    fn release(&mut self) -> PrintResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let result = self.handle.release_interface(self.interface);
        if self.kernel_driver
            && let Err(e) = self.handle.attach_kernel_driver(self.interface)
        {
            warn!(error = %e, "Failed to reattach kernel driver");
        }
        result.map_err(PrintError::from)
    }
}

impl PrintSession for UsbSession {
    #[instrument(skip(self, data), fields(endpoint = self.endpoint, data_len = data.len()))]
    fn write(&mut self, data: &[u8]) -> PrintResult<()> {
        let mut sent = 0;

        while sent < data.len() {
            let n = self
                .handle
                .write_bulk(self.endpoint, &data[sent..], self.timeout)
                .map_err(|e| match e {
                    rusb::Error::Timeout => PrintError::Timeout(format!(
                        "bulk write after {} of {} bytes",
                        sent,
                        data.len()
                    )),
                    other => PrintError::Usb(other),
                })?;

            if n == 0 {
                return Err(PrintError::Incomplete {
                    sent,
                    expected: data.len(),
                });
            }
            sent += n;
        }

        Ok(())
    }

    fn close(mut self) -> PrintResult<()> {
        self.release()
    }
}

impl Drop for UsbSession {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "Failed to release USB printer");
        }
    }
}
