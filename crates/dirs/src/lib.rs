use directories::ProjectDirs;
use std::sync::OnceLock;

pub struct Dirs;

impl Dirs {
    /// Project directory specifically for Markor.
    ///
    /// All the files created by markor are stored there, `None` when no home
    /// directory can be determined.
    pub fn project() -> Option<&'static ProjectDirs> {
        static CELL: OnceLock<Option<ProjectDirs>> = OnceLock::new();

        CELL.get_or_init(|| ProjectDirs::from("net", "gsantner", "Markor"))
            .as_ref()
    }
}
