use std::sync::Arc;

use comanda_printer::{PrinterDevice, UsbPrinter};

use crate::core::Config;
use crate::printing::{PrintService, ReceiptRenderer};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | printer | PrintService<D> | 小票打印服务 |
pub struct ServerState<D: PrinterDevice> {
    pub config: Arc<Config>,
    pub printer: PrintService<D>,
}

impl<D: PrinterDevice> Clone for ServerState<D> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            printer: self.printer.clone(),
        }
    }
}

impl ServerState<UsbPrinter> {
    /// 根据配置初始化 USB 打印机
    pub fn initialize(config: &Config) -> Self {
        let device =
            UsbPrinter::new(config.vendor_id, config.product_id).with_timeout(config.usb_timeout());
        Self::with_device(config, device)
    }
}

impl<D: PrinterDevice> ServerState<D> {
    /// 使用指定打印设备创建状态 (测试时注入替身)
    pub fn with_device(config: &Config, device: D) -> Self {
        let renderer = ReceiptRenderer::new(config.paper_width, config.print_customer);
        Self {
            config: Arc::new(config.clone()),
            printer: PrintService::new(device, renderer),
        }
    }
}
