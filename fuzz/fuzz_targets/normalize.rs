#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_normalize::{Flags, UriComponents};

fuzz_target!(|input: (u32, &str)| {
    let (bits, data) = input;
    let Ok(u) = UriComponents::parse(data) else {
        return;
    };

    let flags: Flags = Flags::all()
        .iter()
        .filter(|flag| bits & flag.bits() != 0)
        .collect();
    let n = u.normalized(flags);

    assert_eq!(u.normalized(Flags::empty()), u);

    if let Ok(s) = n.build() {
        let reparsed = UriComponents::parse(&s).unwrap();
        assert_eq!(reparsed.build().unwrap(), s);
    }
});
