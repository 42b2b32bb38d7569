//! Hand-built byte fixtures for the end-to-end scenarios a baseline decoder
//! must get right: a flat DC-only block, a multi-MCU restart interval, and a
//! truncated scan.

use imgdec_jpeg::{DecodeErrors, JpegDecoder};

/// Appends a DQT segment (8-bit precision, table `index`) with all 64
/// entries set to `fill`, except `dc` at zig-zag position 0.
fn push_dqt(data: &mut Vec<u8>, index: u8, dc: u8, fill: u8) {
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, index]);
    data.push(dc);
    data.extend(std::iter::repeat(fill).take(63));
}

/// Appends an SOF0 segment declaring a single grayscale component, 1x1
/// sampling, using quantization table `qt`.
fn push_sof0_single_component(data: &mut Vec<u8>, width: u16, height: u16, qt: u8) {
    data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 0x08]);
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&[0x01, 0x01, 0x11, qt]);
}

/// Appends a DHT segment with a single code of length 1 ("0") mapping to
/// `symbol`, for the given `class` (0 = DC, 1 = AC) and table `id`.
fn push_single_code_dht(data: &mut Vec<u8>, class: u8, id: u8, symbol: u8) {
    data.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x14, (class << 4) | id]);
    data.push(1);
    data.extend(std::iter::repeat(0u8).take(15));
    data.push(symbol);
}

/// Appends an SOS segment for one component using DC/AC table 0.
fn push_sos_single_component(data: &mut Vec<u8>) {
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
}

/// S1: 8x8 grayscale, single MCU, DC diff=0, immediate EOB, Q[0]=1.
/// Expected: every sample equals 128 (level-shifted zero).
#[test]
fn s1_flat_dc_zero_is_solid_gray_128() {
    let mut data = vec![0xFF, 0xD8];
    push_dqt(&mut data, 0, 1, 1);
    push_sof0_single_component(&mut data, 8, 8, 0);
    push_single_code_dht(&mut data, 0, 0, 0); // DC: code "0" -> category 0
    push_single_code_dht(&mut data, 1, 0, 0); // AC: code "0" -> EOB
    push_sos_single_component(&mut data);
    // DC symbol "0" (1 bit, category 0, no extra bits) + AC symbol "0" (1
    // bit, EOB) = 2 meaningful bits, padded with 1s to fill the byte.
    data.push(0b00_111111);
    data.extend_from_slice(&[0xFF, 0xD9]);

    let mut decoder = JpegDecoder::new(&data);
    let pixels = decoder.decode().unwrap();
    assert_eq!(pixels.len(), 8 * 8 * 3);
    assert!(pixels.iter().all(|&b| b == 128));
}

/// S2: 16x16 YCbCr 4:2:0 JPEG, sampling `(2,2)(1,1)(1,1)`, every coefficient
/// zero. Expected: solid neutral gray (128,128,128).
#[test]
fn s2_420_chroma_all_zero_is_solid_neutral_gray() {
    let mut data = vec![0xFF, 0xD8];
    push_dqt(&mut data, 0, 1, 1);

    // SOF0: 16x16, 3 components: Y at 2x2, Cb and Cr at 1x1, all using
    // quantization table 0.
    data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10, 0x03]);
    data.extend_from_slice(&[0x01, 0x22, 0x00]); // Y: id 1, 2x2, qt 0
    data.extend_from_slice(&[0x02, 0x11, 0x00]); // Cb: id 2, 1x1, qt 0
    data.extend_from_slice(&[0x03, 0x11, 0x00]); // Cr: id 3, 1x1, qt 0

    push_single_code_dht(&mut data, 0, 0, 0); // DC: code "0" -> category 0
    push_single_code_dht(&mut data, 1, 0, 0); // AC: code "0" -> EOB

    // SOS: all 3 components share DC/AC table 0.
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x0C, 0x03]);
    data.extend_from_slice(&[0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);
    data.extend_from_slice(&[0x00, 0x3F, 0x00]);

    // One MCU: 4 Y blocks + 1 Cb block + 1 Cr block, each DC diff=0 +
    // immediate EOB (2 bits), 12 meaningful bits total, padded to 2 bytes.
    data.extend_from_slice(&[0x00, 0x0F]);
    data.extend_from_slice(&[0xFF, 0xD9]);

    let mut decoder = JpegDecoder::new(&data);
    let pixels = decoder.decode().unwrap();
    assert_eq!(pixels.len(), 16 * 16 * 3);
    assert!(pixels.iter().all(|&b| b == 128), "pixels: {pixels:?}");
}

/// S3: luma DC category=3, raw bits 0b101 -> diff=5 with pred=0; AC EOB
/// immediately; Q[0]=8. Expected: DC coefficient 40, constant sample
/// round(40/8)=5, level-shifted to 133, RGB=(133,133,133).
#[test]
fn s3_dc_category_three_produces_level_133() {
    let mut data = vec![0xFF, 0xD8];
    push_dqt(&mut data, 0, 8, 1);
    push_sof0_single_component(&mut data, 8, 8, 0);
    push_single_code_dht(&mut data, 0, 0, 3); // DC: code "0" -> category 3
    push_single_code_dht(&mut data, 1, 0, 0); // AC: code "0" -> EOB
    push_sos_single_component(&mut data);
    // DC symbol "0" (1 bit) + magnitude "101" (3 bits) + AC symbol "0" (1
    // bit, EOB) = 5 meaningful bits, padded with 1s: 0b0101_0111.
    data.push(0b0101_0111);
    data.extend_from_slice(&[0xFF, 0xD9]);

    let mut decoder = JpegDecoder::new(&data);
    let pixels = decoder.decode().unwrap();
    assert!(pixels.iter().all(|&b| b == 133), "pixels: {pixels:?}");
}

/// Builds a 16x8 (2-MCU-wide) grayscale image with every block DC-diff=0,
/// immediate EOB, optionally inserting a `DRI`/`RSTn` pair between the two
/// MCUs.
fn two_mcu_image(with_restart: bool) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    push_dqt(&mut data, 0, 1, 1);
    push_sof0_single_component(&mut data, 16, 8, 0);
    if with_restart {
        data.extend_from_slice(&[0xFF, 0xDD, 0x00, 0x04, 0x00, 0x01]); // DRI=1
    }
    push_single_code_dht(&mut data, 0, 0, 0);
    push_single_code_dht(&mut data, 1, 0, 0);
    push_sos_single_component(&mut data);

    if with_restart {
        // MCU0: DC "0" + AC "0" = 2 bits, padded to a byte, then RST0.
        data.push(0b00_111111);
        data.extend_from_slice(&[0xFF, 0xD0]);
        // MCU1: same pattern, no restart follows (it's the last MCU).
        data.push(0b00_111111);
    } else {
        // Both MCUs packed back-to-back without any alignment in between.
        data.push(0b0000_1111);
    }
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// S5: decoding a file with `DRI=1` and a restart marker between its two
/// MCUs yields the same pixels as the same image encoded without `DRI`.
#[test]
fn s5_restart_interval_is_pixel_identical_to_no_restart() {
    let with_restart = two_mcu_image(true);
    let without_restart = two_mcu_image(false);

    let pixels_a = JpegDecoder::new(&with_restart).decode().unwrap();
    let pixels_b = JpegDecoder::new(&without_restart).decode().unwrap();

    assert_eq!(pixels_a, pixels_b);
    assert!(pixels_a.iter().all(|&b| b == 128));
}

/// S5 (failure path): a `DRI=1` file missing its `RSTn` marker is a fatal
/// restart desync, not silently tolerated.
#[test]
fn s5_missing_restart_marker_is_rejected() {
    let mut data = two_mcu_image(true);
    // Remove the `0xFF 0xD0` restart marker pair that `two_mcu_image`
    // inserted between the two MCU bytes, leaving the second MCU's byte
    // directly after the first with no resynchronization point.
    let rst_pos = data.windows(2).position(|w| w == [0xFF, 0xD0]).unwrap();
    data.drain(rst_pos..rst_pos + 2);

    let mut decoder = JpegDecoder::new(&data);
    let err = decoder.decode().unwrap_err();
    assert!(matches!(err, DecodeErrors::HuffmanDecode(_)), "got {err:?}");
}

/// A restart marker that's present but carries the wrong sequence number
/// (`RSTn` instead of the expected `RST0`) is just as much a desync as a
/// missing one.
#[test]
fn restart_marker_with_wrong_sequence_number_is_rejected() {
    let mut data = two_mcu_image(true);
    let rst_pos = data.windows(2).position(|w| w == [0xFF, 0xD0]).unwrap();
    data[rst_pos + 1] = 0xD3; // RST3 where RST0 was expected

    let mut decoder = JpegDecoder::new(&data);
    let err = decoder.decode().unwrap_err();
    assert!(matches!(err, DecodeErrors::HuffmanDecode(_)), "got {err:?}");
}

/// S6: a scan truncated before `EOI` (here, truncated before any
/// entropy-coded bytes at all) is rejected rather than silently decoded
/// from implicit zero padding.
#[test]
fn s6_truncated_scan_is_rejected() {
    let mut data = vec![0xFF, 0xD8];
    push_dqt(&mut data, 0, 1, 1);
    push_sof0_single_component(&mut data, 8, 8, 0);
    push_single_code_dht(&mut data, 0, 0, 0);
    push_single_code_dht(&mut data, 1, 0, 0);
    push_sos_single_component(&mut data);
    // No entropy-coded bytes and no EOI follow.

    let mut decoder = JpegDecoder::new(&data);
    assert!(decoder.decode().is_err());
}
