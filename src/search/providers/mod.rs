pub mod pixabay;

pub use pixabay::PixabayProvider;
