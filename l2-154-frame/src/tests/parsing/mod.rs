use crate::*;

#[test]
fn parse_intra_pan_data_frame() {
    let psdu = hex::decode("418807cdab02000100dead0000").unwrap();
    let frame = RxFrame::new(&psdu, psdu.len()).unwrap();

    assert_eq!(frame.frame_type(), FrameType::Data);
    assert!(frame.intra_pan());
    assert_eq!(frame.dst_addressing_mode(), AddressingMode::Short);
    assert_eq!(frame.src_addressing_mode(), AddressingMode::Short);
    assert_eq!(frame.sequence_number(), 7);
    assert_eq!(frame.dst_pan_id(), Some(0xabcd));
    assert_eq!(frame.dst_address(), ShortAddress::from_raw(0x0002));
    assert_eq!(frame.src_address(), ShortAddress::from_raw(0x0001));
    assert_eq!(frame.payload(), &[0xde, 0xad]);
    assert_eq!(frame.payload_len(), 2);
    assert_eq!(frame.raw(), &psdu[..]);
}

#[test]
fn parse_truncated_frame() {
    let psdu = hex::decode("418807cdab02000100dead0000").unwrap();
    // Only the header and one payload octet were captured.
    let frame = RxFrame::new(&psdu[..10], psdu.len()).unwrap();

    assert_eq!(frame.payload(), &[0xde]);
    assert_eq!(frame.payload_len(), 2);
    assert_eq!(frame.raw_len(), 10);
    assert!(!frame.is_complete());

    let frame = RxFrame::new(&psdu[..9], psdu.len()).unwrap();
    assert!(frame.payload().is_empty());
    assert_eq!(frame.payload_len(), 2);
}

#[test]
fn parse_extended_source() {
    // Data frame, broadcast destination, extended source, PAN id compression.
    let psdu = hex::decode("41d801cdabffffc7d9b514004b12002b0000000000").unwrap();
    let frame = RxFrame::from_psdu(&psdu).unwrap();

    assert_eq!(frame.frame_type(), FrameType::Data);
    assert_eq!(frame.dst_addressing_mode(), AddressingMode::Short);
    assert_eq!(frame.src_addressing_mode(), AddressingMode::Extended);
    assert_eq!(frame.dst_address(), ShortAddress::BROADCAST);
    assert_eq!(frame.src_address(), ShortAddress::ZERO);
    assert_eq!(frame.payload(), &[0x2b, 0x00, 0x00, 0x00]);
}

#[test]
fn parse_inter_pan_frame() {
    // Intra-PAN bit clear: the source PAN id is present.
    let psdu = hex::decode("018807cdab0200cdab0100aa0000").unwrap();
    let frame = RxFrame::from_psdu(&psdu).unwrap();

    assert!(!frame.intra_pan());
    assert_eq!(frame.src_address(), ShortAddress::from_raw(0x0001));
    assert_eq!(frame.payload(), &[0xaa]);
}

#[test]
fn parse_ack_frame() {
    let psdu = hex::decode("0200070000").unwrap();
    let frame = RxFrame::from_psdu(&psdu).unwrap();

    assert_eq!(frame.frame_type(), FrameType::Ack);
    assert_eq!(frame.dst_addressing_mode(), AddressingMode::Absent);
    assert_eq!(frame.dst_pan_id(), None);
    assert_eq!(frame.payload_len(), 0);
}

#[test]
fn reject_malformed() {
    let psdu = hex::decode("418807cdab02000100dead0000").unwrap();

    // Header not captured.
    assert!(RxFrame::new(&psdu[..8], psdu.len()).is_err());
    // More octets captured than announced.
    assert!(RxFrame::new(&psdu, psdu.len() - 1).is_err());
    // Announced length longer than a PHY packet.
    assert!(RxFrame::new(&psdu, MAX_PHY_PACKET_SIZE + 1).is_err());
    // Security enabled.
    assert!(RxFrame::from_psdu(&hex::decode("498807cdab02000100dead0000").unwrap()).is_err());
    // Reserved destination addressing mode.
    assert!(RxFrame::from_psdu(&hex::decode("418407cdab02000100dead0000").unwrap()).is_err());
    // No room for the FCS.
    assert!(RxFrame::from_psdu(&psdu[..10]).is_err());
    assert!(RxFrame::from_psdu(&[]).is_err());
}
