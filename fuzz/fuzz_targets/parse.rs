#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_normalize::UriComponents;

fuzz_target!(|data: &str| {
    let Ok(u1) = UriComponents::parse(data) else {
        return;
    };

    // Parsed components always serialize.
    let s = u1.build().unwrap();
    let u2 = UriComponents::parse(&s).unwrap();
    assert_eq!(u1, u2);
    assert_eq!(u2.build().unwrap(), s);
});
