#![no_main]

use libfuzzer_sys::fuzz_target;
use meow_runtime::{is_grumpy_category, CatResult};

fuzz_target!(|data: &[u8]| {
    let category = String::from_utf8_lossy(data);
    if is_grumpy_category(&category) {
        let trimmed = category.trim().to_ascii_lowercase();
        assert!(trimmed == "no" || trimmed == "grumpy");
    }
    let result = CatResult {
        image: category.into_owned(),
    };
    if let Ok(rendered) = result.format() {
        assert!(rendered.starts_with("![cat image]("));
    }
});
