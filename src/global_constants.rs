pub const APPLICATION_TITLE: &str = "Snip to Text";

pub const LOG_TAG_CAPTURE: &str = "[CAPTURE]";
pub const LOG_TAG_OVERLAY: &str = "[OVERLAY]";
pub const LOG_TAG_PIPELINE: &str = "[PIPELINE]";
pub const LOG_TAG_LOCATOR: &str = "[LOCATOR]";
pub const LOG_TAG_ACQUISITION: &str = "[ACQUISITION]";
pub const LOG_TAG_INSTALLER: &str = "[INSTALLER]";
pub const LOG_TAG_TESSERACT: &str = "[TESSERACT]";

pub const ERROR_CONTEXT_SCALE_FACTOR: &str = "Unable to get scale factor";
pub const ERROR_CONTEXT_CAPTURE_MONITOR: &str = "Unable to capture Monitor";
pub const ERROR_CONTEXT_LIST_MONITORS: &str = "Unable to list monitors";

pub const ENGINE_PROGRAM_NAME: &str = "tesseract";

#[cfg(target_os = "windows")]
pub const WELL_KNOWN_ENGINE_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

#[cfg(target_os = "macos")]
pub const WELL_KNOWN_ENGINE_PATHS: &[&str] = &["/opt/homebrew/bin/tesseract", "/usr/local/bin/tesseract"];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const WELL_KNOWN_ENGINE_PATHS: &[&str] = &["/usr/bin/tesseract", "/usr/local/bin/tesseract"];

#[cfg(target_os = "windows")]
pub const INSTALLER_URL: Option<&str> = Some(
    "https://github.com/UB-Mannheim/tesseract/releases/download/v5.4.0.20240606/tesseract-ocr-w64-setup-5.4.0.20240606.exe",
);

#[cfg(not(target_os = "windows"))]
pub const INSTALLER_URL: Option<&str> = None;

#[cfg(target_os = "windows")]
pub const INSTALLER_FILE_SUFFIX: &str = ".exe";

#[cfg(not(target_os = "windows"))]
pub const INSTALLER_FILE_SUFFIX: &str = ".bin";

pub const DOWNLOAD_TIMEOUT_SECONDS: u64 = 30;

pub const ENV_ENGINE_PATH: &str = "SNIP_TO_TEXT_TESSERACT";
pub const ENV_CAPTURE_DELAY: &str = "SNIP_TO_TEXT_DELAY";

pub const MAX_CAPTURE_DELAY_SECONDS: u64 = 10;
pub const CAPTURE_DELAY_CHOICES: [u64; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
pub const WINDOW_SETTLE_MILLISECONDS: u64 = 200;

pub const OVERLAY_DIM_RGBA: (f32, f32, f32, f32) = (0.0, 0.0, 0.0, 0.3);
pub const OVERLAY_PEN_RGB: (u8, u8, u8) = (0, 120, 215);
pub const OVERLAY_PEN_WIDTH: f32 = 2.0;

pub const NO_TEXT_FOUND: &str = "(no text found)";
pub const TEXT_AREA_PLACEHOLDER: &str = "Captured text will appear here...";

pub const DIALOG_ENGINE_NOT_FOUND_TITLE: &str = "Tesseract not found";
pub const DIALOG_ENGINE_NOT_FOUND_TEXT: &str = "Tesseract OCR is not installed or not on PATH.";
pub const DIALOG_BUTTON_SELECT: &str = "Select tesseract";
pub const DIALOG_BUTTON_DOWNLOAD: &str = "Download and install";
pub const DIALOG_BUTTON_CANCEL: &str = "Cancel";
pub const DIALOG_PICK_ENGINE_TITLE: &str = "Select tesseract executable";
pub const DIALOG_INSTALLER_LAUNCHED_TITLE: &str = "Installer launched";
pub const DIALOG_INSTALLER_LAUNCHED_TEXT: &str =
    "Complete the installer, then click OK to re-check for Tesseract.";
pub const DIALOG_DOWNLOAD_FAILED_TITLE: &str = "Download failed";
pub const DIALOG_ENGINE_MISSING_TITLE: &str = "Tesseract missing";
pub const DIALOG_ENGINE_MISSING_TEXT: &str =
    "Tesseract is still not available. Please install or select it before capturing.";
