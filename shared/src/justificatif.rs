/// Image formats accepted as a bill's supporting document
const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Whether `file_name` may be attached to a bill.
///
/// Only the text after the basename's last dot is checked, case-insensitively,
/// so a bare `.png` counts too. The file content is never inspected.
pub fn is_acceptable_file(file_name: &str) -> bool {
    file_name_from_path(file_name)
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|accepted| ext.eq_ignore_ascii_case(accepted)))
        .unwrap_or(false)
}

/// Last segment of a browser file path such as `C:\fakepath\receipt.png`
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}
