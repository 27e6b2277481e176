use l2_154::frame::ShortAddress;
use l2_154::phy::{config::Channel, queue::QueueTransceiver};
use l2_154::{L2Config, L2Net, RecvStatus};

fn node(address: &str) -> L2Net<QueueTransceiver> {
    let config = L2Config::new(ShortAddress::parse_lossy(address), Channel::_15, 0xabcd);
    match L2Net::start(QueueTransceiver::new(), config) {
        Ok(l2) => l2,
        Err(err) => panic!("cannot start {address}: {err}"),
    }
}

fn drain(l2: &mut L2Net<QueueTransceiver>) {
    loop {
        match l2.recv() {
            RecvStatus::Ok => {
                let src = l2.src_address().unwrap_or(ShortAddress::ZERO);
                let payload = l2.payload().unwrap_or(&[]);
                log::info!(
                    "{} got {:?} from {}",
                    l2.address(),
                    String::from_utf8_lossy(payload),
                    src
                );
                let _ = l2.log_dump(0, 32);
            }
            RecvStatus::WrongDestination => {
                log::info!(
                    "{} overheard a frame for {}",
                    l2.address(),
                    l2.dst_address().unwrap_or(ShortAddress::ZERO)
                );
            }
            RecvStatus::Empty => break,
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let mut alice = node("01:00");
    let mut bob = node("02:00");

    let bcast = *alice.bcast_addr();
    alice.send(bcast, b"hello everyone");
    alice.send(bob.address(), b"hello bob");
    alice.send(ShortAddress::from_raw(0x0003), b"hello carol");

    let oversized = vec![0; alice.max_payload() + 1];
    assert!(!alice.send(bob.address(), &oversized));

    let delivered = alice.deliver_to(&mut bob);
    log::info!("delivered {delivered} frames");

    drain(&mut bob);
}
