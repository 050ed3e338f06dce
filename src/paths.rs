use std::path::PathBuf;

/// Data files live next to the executable, or in the working directory when
/// its location is unknown.
pub fn beside_executable(file_name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(file_name);
        }
    }
    PathBuf::from(file_name)
}
