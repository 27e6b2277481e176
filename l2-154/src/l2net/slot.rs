use crate::phy::transceiver::Transceiver;

/// The frame currently lent to the link layer by the transceiver.
pub(crate) enum Slot<F> {
    Empty,
    Holding(F),
}

impl<F> Slot<F> {
    pub(crate) fn frame(&self) -> Option<&F> {
        match self {
            Slot::Empty => None,
            Slot::Holding(frame) => Some(frame),
        }
    }

    pub(crate) fn is_holding(&self) -> bool {
        matches!(self, Slot::Holding(_))
    }

    /// Hand the held frame back to the transceiver, if any.
    ///
    /// Returns whether a frame was released.
    pub(crate) fn release<T>(&mut self, transceiver: &mut T) -> bool
    where
        T: Transceiver<Frame = F>,
    {
        match core::mem::replace(self, Slot::Empty) {
            Slot::Holding(frame) => {
                transceiver.skip_received(frame);
                true
            }
            Slot::Empty => false,
        }
    }

    /// Release the held frame, then take the next one from the transceiver.
    pub(crate) fn advance<T>(&mut self, transceiver: &mut T) -> Option<&F>
    where
        T: Transceiver<Frame = F>,
    {
        if self.release(transceiver) {
            trace!("l2: released previous frame");
        }

        if let Some(frame) = transceiver.received() {
            *self = Slot::Holding(frame);
        }

        self.frame()
    }
}
