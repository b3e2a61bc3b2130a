// channel is 0-15, displayed to users as 1-16.
clamp!(Channel, u8, 0, 15, 0, pub);

clamp!(NoteNumber, u8, 0, 127, 60, pub);
clamp!(Velocity, u8, 0, 127, 64, pub);
clamp!(Program, u8, 0, 127, 0, pub);
clamp!(ControlNumber, u8, 0, 127, 0, pub);
clamp!(ControlValue, u8, 0, 127, 0, pub);
clamp!(PressureValue, u8, 0, 127, 0, pub);
clamp!(PortValue, u8, 0, 127, 0, pub);

clamp!(
    /// A 14-bit pitch bend amount. `8192` is centered (no bend). On the wire
    /// the value is transported as two 7-bit data bytes, least-significant
    /// first.
    PitchBendValue,
    u16,
    0,
    16383,
    8192,
    pub
);

impl PitchBendValue {
    /// Reassemble the value from its wire form, LSB then MSB.
    pub fn from_bytes(lsb: u8, msb: u8) -> Self {
        Self::new((u16::from(msb & 0x7F) << 7) | u16::from(lsb & 0x7F))
    }

    /// The low seven bits, sent first on the wire.
    pub fn lsb(&self) -> u8 {
        (self.get() & 0x7F) as u8
    }

    /// The high seven bits, sent second on the wire.
    pub fn msb(&self) -> u8 {
        (self.get() >> 7) as u8
    }
}

#[test]
fn out_of_range_construction() {
    use crate::ErrorKind;
    let err = Channel::try_new(200).err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
    assert_eq!(15, Channel::try_new(15).unwrap().get());
    assert!(NoteNumber::try_new(128).is_err());
    assert!(PitchBendValue::try_new(16384).is_err());
    assert_eq!(16383, PitchBendValue::try_new(16383).unwrap().get());
}

#[test]
fn pitch_bend_bytes() {
    let center = PitchBendValue::default();
    assert_eq!(8192, center.get());
    assert_eq!(0x00, center.lsb());
    assert_eq!(0x40, center.msb());
    assert_eq!(center, PitchBendValue::from_bytes(0x00, 0x40));
    let max = PitchBendValue::new(16383);
    assert_eq!(0x7F, max.lsb());
    assert_eq!(0x7F, max.msb());
    assert_eq!(PitchBendValue::new(1), PitchBendValue::from_bytes(0x01, 0x00));
}
