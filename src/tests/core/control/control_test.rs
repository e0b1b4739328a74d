#[cfg(test)]
mod tests {
    use crate::core::control::{ControlWord, StatusWord};
    use crate::core::counter::Pulses;

    #[test]
    fn test_decode_bit_map() {
        let word = ControlWord::decode(0b0000_1001);
        assert!(word.enable);
        assert!(!word.load);
        assert!(!word.up);
        assert!(word.output_enable);

        let word = ControlWord::decode(0b0000_0110);
        assert!(!word.enable && word.load && word.up && !word.output_enable);
    }

    #[test]
    fn test_upper_bits_ignored() {
        assert_eq!(ControlWord::decode(0xF0), ControlWord::decode(0x00));
        assert_eq!(ControlWord::decode(0xFF).encode(), 0x0F);
    }

    #[test]
    fn test_default_counts_up() {
        let word = ControlWord::default();
        assert_eq!(word.encode(), 0b0100);
    }

    #[test]
    fn test_encode_decode_all_nibbles() {
        for byte in 0..16u8 {
            assert_eq!(ControlWord::decode(byte).encode(), byte);
        }
    }

    #[test]
    fn test_control_json_defaults() {
        let word: ControlWord = serde_json::from_str(r#"{"enable": true}"#).unwrap();
        assert_eq!(
            word,
            ControlWord {
                enable: true,
                load: false,
                up: true,
                output_enable: false
            }
        );
    }

    #[test]
    fn test_status_bits() {
        let status = StatusWord::from_pulses(&Pulses {
            loaded: true,
            wrap: false,
            carry_borrow: false,
        });
        assert_eq!(status.bits(), 1 << 5);

        let status = StatusWord::from_pulses(&Pulses {
            loaded: false,
            wrap: true,
            carry_borrow: true,
        });
        assert_eq!(status.bits(), 0b1100_0000);
        assert_eq!(StatusWord::decode(status.bits()), status);
        assert_eq!(StatusWord::decode(0x1F), StatusWord::default());
    }
}
