#![no_main]

use dotvalue::{format_marshalled, MarshalType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&tag, payload)) = data.split_first() else {
        return;
    };

    if let Ok(ty) = MarshalType::try_from(i32::from(tag as i8)) {
        let _ = format_marshalled(ty, payload);
    }
});
