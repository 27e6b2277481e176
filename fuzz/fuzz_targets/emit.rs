#![no_main]

use l2_154_frame::{check_fcs, DataFrameRepr, ReceivedFrame, RxFrame};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|repr: DataFrameRepr| {
    let mut buffer = vec![0; repr.buffer_len()];
    if repr.emit(&mut buffer).is_err() {
        return;
    }

    assert!(check_fcs(&buffer));
    let frame = RxFrame::from_psdu(&buffer).unwrap();
    assert_eq!(frame.dst_address(), repr.dst);
    assert_eq!(frame.src_address(), repr.src);
    assert_eq!(frame.payload(), repr.payload);
});
