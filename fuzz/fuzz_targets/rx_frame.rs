#![no_main]

use l2_154_frame::{check_fcs, ReceivedFrame, RxFrame};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: (u8, &[u8])| -> Corpus {
    let (missing, psdu) = data;
    if psdu.len() > 127 {
        return Corpus::Reject;
    }

    let _ = check_fcs(psdu);

    let captured = &psdu[..psdu.len().saturating_sub(missing as usize)];
    if let Ok(frame) = RxFrame::new(captured, psdu.len()) {
        assert!(frame.payload().len() <= frame.payload_len());
        let _ = frame.dst_address();
        let _ = frame.src_address();
        let _ = frame.to_string();
    }

    Corpus::Keep
});
