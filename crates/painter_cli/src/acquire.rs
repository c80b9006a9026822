use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use image::DynamicImage;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const IMAGE_HINTS: [&str; 6] = ["jpeg", "jpg", "png", "gif", "webp", "bmp"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Web(String),
    Clipboard,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Web(url) => f.write_str(url),
            ImageSource::Clipboard => f.write_str("clipboard"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("failed to open image file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to download image")]
    Http(#[from] reqwest::Error),
    #[error(
        "URL returned HTML instead of an image (content-type: {0}); it may require \
         authentication, may not be a direct image link, or the server may block automated \
         requests"
    )]
    Html(String),
    #[error("URL does not point to an image (content-type: {0})")]
    NotAnImage(String),
    #[error("failed to decode downloaded image")]
    Decode(#[source] image::ImageError),
    #[error("PowerShell not found; clipboard capture requires Windows or WSL")]
    PowerShellMissing,
    #[error("failed to get image from clipboard: {0}")]
    Clipboard(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn load(source: &ImageSource) -> Result<DynamicImage, AcquireError> {
    match source {
        ImageSource::File(path) => open(path),
        ImageSource::Web(url) => download(url),
        ImageSource::Clipboard => capture_clipboard(),
    }
}

fn open(path: &Path) -> Result<DynamicImage, AcquireError> {
    image::open(path).map_err(|source| AcquireError::Open { path: path.to_path_buf(), source })
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers
}

fn download(url: &str) -> Result<DynamicImage, AcquireError> {
    info!("downloading image from {url}");
    if url.contains("slack.com") {
        warn!(
            "Slack file URLs require authentication and usually cannot be fetched directly; \
             download the image and pass the local file instead"
        );
    }

    let client =
        Client::builder().timeout(DOWNLOAD_TIMEOUT).default_headers(browser_headers()).build()?;
    let response = client.get(url).send()?.error_for_status()?;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    check_content_type(&content_type)?;

    let bytes = response.bytes()?;
    let image = image::load_from_memory(&bytes).map_err(AcquireError::Decode)?;
    info!("downloaded {}x{} image", image.width(), image.height());
    Ok(image)
}

pub fn check_content_type(content_type: &str) -> Result<(), AcquireError> {
    if content_type.starts_with("image/")
        || IMAGE_HINTS.iter().any(|hint| content_type.contains(hint))
    {
        return Ok(());
    }
    if content_type.contains("text/html") {
        return Err(AcquireError::Html(content_type.to_owned()));
    }
    Err(AcquireError::NotAnImage(content_type.to_owned()))
}

/// Saves the clipboard image through PowerShell, then decodes it.
fn capture_clipboard() -> Result<DynamicImage, AcquireError> {
    let dir = tempfile::Builder::new().prefix("ascii-painter").tempdir()?;
    let path = dir.path().join("clipboard.png");
    let script = clipboard_script(&windows_path(&path));

    let output = Command::new("powershell.exe")
        .args(["-NoProfile", "-Command", &script])
        .output()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => AcquireError::PowerShellMissing,
            _ => AcquireError::Io(err),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let message =
            if stderr.is_empty() { "unknown PowerShell error".to_owned() } else { stderr };
        return Err(AcquireError::Clipboard(message));
    }
    if !path.exists() {
        return Err(AcquireError::Clipboard("PowerShell did not write the image".to_owned()));
    }

    debug!("clipboard image saved to {}", path.display());
    open(&path)
}

fn clipboard_script(target: &str) -> String {
    let target = target.replace('\'', "''");
    format!(
        "$img = Get-Clipboard -Format Image; \
         if (-not $img) {{ Write-Error 'No image found in clipboard'; exit 1 }}; \
         $img.Save('{target}',[System.Drawing.Imaging.ImageFormat]::Png)"
    )
}

/// Converts a path for PowerShell, using `wslpath` when running under WSL.
fn windows_path(path: &Path) -> String {
    match Command::new("wslpath").arg("-w").arg(path).output() {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_owned()
        },
        _ => path.display().to_string().replace('/', "\\"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_content_types_pass() {
        assert!(check_content_type("image/png").is_ok());
        assert!(check_content_type("image/svg+xml").is_ok());
        assert!(check_content_type("application/octet-stream; name=cat.jpeg").is_ok());
    }

    #[test]
    fn html_gets_its_own_error() {
        let err = check_content_type("text/html; charset=utf-8").unwrap_err();
        assert!(matches!(err, AcquireError::Html(_)));
        assert!(err.to_string().contains("authentication"));
    }

    #[test]
    fn other_types_are_rejected() {
        let err = check_content_type("application/json").unwrap_err();
        assert!(matches!(err, AcquireError::NotAnImage(_)));
        assert!(matches!(check_content_type(""), Err(AcquireError::NotAnImage(_))));
    }

    #[test]
    fn clipboard_script_quotes_path() {
        let script = clipboard_script(r"C:\Users\o'neil\clip.png");
        assert!(script.contains(r"$img.Save('C:\Users\o''neil\clip.png',"));
        assert!(script.starts_with("$img = Get-Clipboard -Format Image;"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load(&ImageSource::File("/no/such/image.png".into())).unwrap_err();
        assert!(matches!(err, AcquireError::Open { .. }));
        assert!(err.to_string().contains("/no/such/image.png"));
    }

    #[test]
    fn files_are_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::GrayImage::from_pixel(3, 2, image::Luma([9])).save(&path).unwrap();

        let image = load(&ImageSource::File(path)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn sources_display_for_messages() {
        let web = ImageSource::Web("https://x.test/a.png".into());
        assert_eq!(web.to_string(), "https://x.test/a.png");
        assert_eq!(ImageSource::Clipboard.to_string(), "clipboard");
    }
}
