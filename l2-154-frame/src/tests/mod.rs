use super::*;
use std::string::ToString;

mod parsing;

#[test]
fn emit_data_frame() {
    let repr = DataFrameRepr {
        sequence_number: 7,
        pan_id: 0xabcd,
        dst: "02:00".parse().unwrap(),
        src: "01:00".parse().unwrap(),
        payload: &[0xde, 0xad],
    };

    let mut buffer = vec![0; repr.buffer_len()];
    let len = repr.emit(&mut buffer[..]).unwrap();

    assert_eq!(len, 13);
    assert_eq!(
        buffer[..len - FCS_SIZE],
        [0x41, 0x88, 0x07, 0xcd, 0xab, 0x02, 0x00, 0x01, 0x00, 0xde, 0xad]
    );
    assert!(check_fcs(&buffer));
}

#[test]
fn emit_then_read() {
    let payload = [0x60, 0x00, 0x00, 0x00, 0x00, 0x08, 0x3a, 0x40];
    let repr = DataFrameRepr {
        sequence_number: 0xfe,
        pan_id: 0x1234,
        dst: ShortAddress::BROADCAST,
        src: ShortAddress::from_raw(0xbeef),
        payload: &payload,
    };

    let mut buffer = [0u8; MAX_PHY_PACKET_SIZE];
    let len = repr.emit(&mut buffer).unwrap();
    let frame = RxFrame::from_psdu(&buffer[..len]).unwrap();

    assert_eq!(frame.frame_type(), FrameType::Data);
    assert_eq!(frame.dst_addressing_mode(), AddressingMode::Short);
    assert_eq!(frame.src_addressing_mode(), AddressingMode::Short);
    assert!(frame.intra_pan());
    assert_eq!(frame.sequence_number(), 0xfe);
    assert_eq!(frame.dst_pan_id(), Some(0x1234));
    assert_eq!(frame.dst_address(), ShortAddress::BROADCAST);
    assert_eq!(frame.src_address(), ShortAddress::from_raw(0xbeef));
    assert_eq!(frame.payload(), &payload);
    assert_eq!(frame.payload_len(), payload.len());
    assert_eq!(frame.raw_len(), len);
    assert!(frame.is_complete());
}

#[test]
fn address_text_round_trip() {
    for _ in 0..256 {
        let raw: u16 = rand::random();
        let [lo, hi] = raw.to_le_bytes();
        let text = format!("{lo:02x}:{hi:02x}");

        let addr: ShortAddress = text.parse().unwrap();
        assert_eq!(addr.raw(), raw);
        assert_eq!(addr.to_string(), format!("{lo:02x} : {hi:02x}"));
    }
}

#[test]
fn display_rx_frame() {
    let psdu = hex::decode("418807cdab02000100dead0000").unwrap();
    let frame = RxFrame::from_psdu(&psdu).unwrap();

    assert_eq!(
        frame.to_string(),
        "Frame Control
  type: Data
  security enabled: 0
  frame pending: 0
  ack request: 0
  intra pan: 1
  dst addressing mode: Short
  src addressing mode: Short
  frame version: Ieee802154_2003
Addressing Fields
  dst pan id: abcd
  dst address: 02 : 00
  src address: 01 : 00
Payload: 2 of 2 octets captured
"
    );
}
