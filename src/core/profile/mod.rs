mod builder;
mod model;
mod zip;

pub use builder::{synthesize, ProfileBuilder};
pub use model::{
    LaunchProfile, Library, LibraryRule, LoaderLauncherMeta, LoaderLibraries, MainClass,
    ProfileArguments, Side,
};
pub use self::zip::package_zip;

/// File name served for the JSON form of a profile.
pub fn json_file_name(loader_version: &str, game_version: &str) -> String {
    format!("fabric-loader-{}-{}.json", loader_version, game_version)
}

/// File name served for the zipped form of a profile.
pub fn zip_file_name(loader_version: &str, game_version: &str) -> String {
    format!("fabric-loader-{}-{}.zip", loader_version, game_version)
}
