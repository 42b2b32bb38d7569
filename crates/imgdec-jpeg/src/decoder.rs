//! The top-level decoder: drives segment parsing, then the MCU decode loop.

use log::{debug, trace, warn};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::bitstream::BitReader;
use crate::color_convert::{gray_to_rgb, ycbcr_to_grayscale, ycbcr_to_rgb};
use crate::components::{Components, SampleRatios};
use crate::errors::DecodeErrors;
use crate::huffman::HuffmanTable;
use crate::idct::{choose_idct_func, IDCTPtr};
use crate::marker::Marker;
use crate::misc::{MAX_COMPONENTS, MAX_DIMENSIONS, UN_ZIGZAG};
use crate::reader::ByteReader;
use crate::upsampler::upsample_nearest;

/// Frame-level metadata, available after [`JpegDecoder::read_info`] or
/// [`JpegDecoder::decode`] has run.
#[derive(Debug, Copy, Clone, Default)]
pub struct ImageInfo {
    pub width: u16,
    pub height: u16,
    pub components: u8
}

impl ImageInfo {
    pub const fn width(&self) -> u16 {
        self.width
    }
    pub const fn height(&self) -> u16 {
        self.height
    }
}

/// Parsed contents of a JFIF `APP0` segment (ITU-T T.871 / JFIF 1.02 §4),
/// when one is present. Purely informational: nothing here feeds the pixel
/// pipeline, but it's surfaced so a caller can tell a JFIF-labeled file from
/// a bare JPEG stream or one carrying e.g. an Exif `APP1` instead.
#[derive(Debug, Copy, Clone)]
pub struct JfifHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub density_units: u8,
    pub x_density: u16,
    pub y_density: u16
}

/// Per-component parameters snapshotted before the MCU loop runs, so the
/// hot path never needs to borrow `self.components` while also indexing
/// `self.qt_tables`/`self.*_huffman_tables`.
struct CompMeta {
    h: usize,
    v: usize,
    stride: usize,
    qt_index: usize,
    dc_table: usize,
    ac_table: usize
}

/// A baseline (SOF0) sequential JPEG decoder.
///
/// Construct with [`JpegDecoder::new`], then call [`JpegDecoder::decode`] to
/// get interleaved pixel bytes, or [`JpegDecoder::read_info`] to read just
/// the frame dimensions without touching the entropy-coded scan.
pub struct JpegDecoder<'a> {
    stream: &'a [u8],
    options: DecoderOptions,

    info: ImageInfo,
    jfif: Option<JfifHeader>,
    qt_tables: [Option<[i32; 64]>; MAX_COMPONENTS],
    dc_huffman_tables: [Option<HuffmanTable>; MAX_COMPONENTS],
    ac_huffman_tables: [Option<HuffmanTable>; MAX_COMPONENTS],
    components: Vec<Components>,

    h_max: usize,
    v_max: usize,
    mcu_width: usize,
    mcu_height: usize,
    sub_sample_ratio: SampleRatios,
    input_colorspace: ColorSpace,

    restart_interval: usize,
    idct_func: IDCTPtr,

    headers_decoded: bool,
    /// Byte offset into `stream` where the entropy-coded scan begins, set
    /// once `parse_sos` returns.
    scan_start: usize
}

impl<'a> JpegDecoder<'a> {
    /// Create a decoder over an in-memory JPEG file.
    pub fn new(stream: &'a [u8]) -> Self {
        Self::new_with_options(stream, DecoderOptions::default())
    }

    pub fn new_with_options(stream: &'a [u8], options: DecoderOptions) -> Self {
        JpegDecoder {
            stream,
            options,
            info: ImageInfo::default(),
            jfif: None,
            qt_tables: [None, None, None, None],
            dc_huffman_tables: [None, None, None, None],
            ac_huffman_tables: [None, None, None, None],
            components: Vec::new(),
            h_max: 1,
            v_max: 1,
            mcu_width: 0,
            mcu_height: 0,
            sub_sample_ratio: SampleRatios::None,
            input_colorspace: ColorSpace::YCbCr,
            restart_interval: 0,
            idct_func: choose_idct_func(),
            headers_decoded: false,
            scan_start: 0
        }
    }

    pub const fn info(&self) -> ImageInfo {
        self.info
    }

    /// The parsed `APP0` JFIF header, if the file carried one. `None` for a
    /// bare JPEG stream or one whose first `APP0` didn't carry the `JFIF\0`
    /// identifier (e.g. a JFXX extension or some other vendor's `APP0`).
    pub const fn jfif_header(&self) -> Option<JfifHeader> {
        self.jfif
    }

    /// Parse just enough of the file to learn its dimensions, without
    /// touching the entropy-coded scan.
    pub fn read_info(&mut self) -> Result<ImageInfo, DecodeErrors> {
        self.decode_headers()?;
        Ok(self.info)
    }

    /// Fully decode the image, returning interleaved 8-bit samples in the
    /// colorspace requested by `options.out_colorspace` (RGB by default).
    pub fn decode(&mut self) -> Result<Vec<u8>, DecodeErrors> {
        self.decode_headers()?;
        self.decode_scan()
    }

    fn decode_headers(&mut self) -> Result<(), DecodeErrors> {
        if self.headers_decoded {
            return Ok(());
        }

        let mut reader = ByteReader::new(self.stream);

        if reader.read_u16_be_err()? != 0xFFD8 {
            return Err(DecodeErrors::IllegalMagicBytes);
        }

        loop {
            // Scan forward to the next marker. Consecutive 0xFF fill bytes
            // before a marker are legal padding (ITU-T T.81 B.1.1.5); a lone
            // 0xFF followed by 0x00 can't legally occur here (that stuffing
            // only exists inside an entropy-coded scan) but is tolerated by
            // simply continuing the search.
            let marker_byte = loop {
                if reader.read_u8_err()? != 0xFF {
                    continue;
                }
                let next = reader.read_u8_err()?;
                if next == 0xFF {
                    reader.rewind(1);
                    continue;
                }
                if next != 0x00 {
                    break next;
                }
            };

            let marker = Marker::from_u8(marker_byte)
                .ok_or_else(|| DecodeErrors::Format(format!("Unknown marker 0xFF{marker_byte:02X}")))?;
            trace!("Found marker {marker:?} at byte offset {}", reader.position() - 2);

            match marker {
                Marker::SOF(0) => self.parse_sof0(&mut reader)?,
                Marker::SOF(n) => {
                    return Err(DecodeErrors::Unsupported(format!(
                        "SOF{n} frames (progressive/lossless/arithmetic/extended) are not supported, only baseline SOF0"
                    )));
                }
                Marker::DQT => self.parse_dqt(&mut reader)?,
                Marker::DHT => self.parse_dht(&mut reader)?,
                Marker::DRI => self.parse_dri(&mut reader)?,
                Marker::SOS => {
                    self.parse_sos(&mut reader)?;
                    self.headers_decoded = true;
                    self.scan_start = reader.position();
                    return Ok(());
                }
                Marker::APP(0) => self.parse_app0(&mut reader)?,
                Marker::APP(n) => {
                    warn!("Ignoring APP{n} segment contents (ICC/EXIF metadata is not interpreted)");
                    self.skip_segment(&mut reader)?
                }
                Marker::COM => self.skip_segment(&mut reader)?,
                Marker::EOI => {
                    return Err(DecodeErrors::Format(
                        "Got EOI before a scan was found".to_string()
                    ));
                }
                Marker::RST(_) => {
                    return Err(DecodeErrors::Format(
                        "Unexpected restart marker outside of a scan".to_string()
                    ));
                }
                Marker::SOI => {
                    return Err(DecodeErrors::Format("Duplicate SOI marker".to_string()));
                }
                Marker::Unknown(_) => self.skip_segment(&mut reader)?
            }
        }
    }

    /// Parse an `APP0` segment as a JFIF header when its identifier matches
    /// `"JFIF\0"`; otherwise it's some other vendor's `APP0` (e.g. a JFXX
    /// thumbnail extension) and is skipped like any other APPn. An embedded
    /// thumbnail, if present, is parsed only far enough to skip over it by
    /// its declared dimensions; its pixels are never decoded (out of scope
    /// per §1).
    fn parse_app0(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let length = reader.read_u16_be_err()?;
        if length < 2 {
            return Err(DecodeErrors::Format("APP0 segment length shorter than its own header".to_string()));
        }
        let mut remaining = usize::from(length) - 2;

        if remaining < 5 || reader.peek_at(0, 5)? != &b"JFIF\0"[..] {
            reader.skip(remaining);
            return Ok(());
        }
        reader.skip(5);
        remaining -= 5;

        if remaining < 9 {
            warn!("APP0 claims the JFIF identifier but is too short to hold a full JFIF header");
            reader.skip(remaining);
            return Ok(());
        }

        let version_major = reader.read_u8_err()?;
        let version_minor = reader.read_u8_err()?;
        let density_units = reader.read_u8_err()?;
        let x_density = reader.read_u16_be_err()?;
        let y_density = reader.read_u16_be_err()?;
        let thumb_w = reader.read_u8_err()?;
        let thumb_h = reader.read_u8_err()?;
        remaining -= 9;

        if density_units > 2 {
            warn!("JFIF APP0 declares unknown density unit {density_units}, ignoring it");
        }

        let thumb_bytes = usize::from(thumb_w) * usize::from(thumb_h) * 3;
        if thumb_bytes > remaining {
            return Err(DecodeErrors::Format(
                "JFIF APP0 thumbnail dimensions overrun the segment length".to_string()
            ));
        }
        reader.skip(remaining);

        debug!("JFIF {version_major}.{version_minor:02}, density {x_density}x{y_density} (unit {density_units})");
        self.jfif = Some(JfifHeader { version_major, version_minor, density_units, x_density, y_density });
        Ok(())
    }

    fn skip_segment(&self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let length = reader.read_u16_be_err()?;
        if length < 2 {
            return Err(DecodeErrors::Format("Segment length shorter than its own header".to_string()));
        }
        reader.skip(usize::from(length) - 2);
        Ok(())
    }

    fn parse_sof0(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let length = reader.read_u16_be_err()?;
        let precision = reader.read_u8_err()?;
        if precision != 8 {
            return Err(DecodeErrors::Unsupported(format!(
                "{precision}-bit sample precision is not supported, only 8-bit"
            )));
        }

        let height = reader.read_u16_be_err()?;
        let width = reader.read_u16_be_err()?;
        if width == 0 || height == 0 {
            return Err(DecodeErrors::SofError("Zero width or height".to_string()));
        }
        if usize::from(width) > self.options.get_max_width()
            || usize::from(height) > self.options.get_max_height()
        {
            return Err(DecodeErrors::SofError(format!(
                "Image dimensions {width}x{height} exceed configured maximum {}x{}",
                self.options.get_max_width(),
                self.options.get_max_height()
            )));
        }
        if usize::from(width) * usize::from(height) > MAX_DIMENSIONS {
            return Err(DecodeErrors::SofError("Image dimensions too large".to_string()));
        }

        let num_components = reader.read_u8_err()?;
        if length != 8 + 3 * u16::from(num_components) {
            return Err(DecodeErrors::SofError("SOF0 segment length does not match component count".to_string()));
        }
        if !(1..=3).contains(&num_components) {
            return Err(DecodeErrors::Unsupported(format!(
                "{num_components} components in frame; only 1 (grayscale) or 3 (YCbCr) are supported"
            )));
        }

        let mut components = Vec::with_capacity(usize::from(num_components));
        for _ in 0..num_components {
            let bytes = reader.read_exact_bytes(3)?;
            components.push(Components::from([bytes[0], bytes[1], bytes[2]])?);
        }

        let blocks_per_mcu: usize = components.iter().map(|c| c.horizontal_sample * c.vertical_sample).sum();
        if blocks_per_mcu > 10 {
            return Err(DecodeErrors::Unsupported(format!(
                "{blocks_per_mcu} blocks per MCU exceeds the baseline limit of 10"
            )));
        }

        self.h_max = components.iter().map(|c| c.horizontal_sample).max().unwrap_or(1);
        self.v_max = components.iter().map(|c| c.vertical_sample).max().unwrap_or(1);
        self.sub_sample_ratio = match (self.h_max, self.v_max) {
            (1, 1) => SampleRatios::None,
            (2, 1) => SampleRatios::H,
            (1, 2) => SampleRatios::V,
            (2, 2) => SampleRatios::HV,
            (h, v) => {
                return Err(DecodeErrors::Unsupported(format!(
                    "Unsupported sampling factor combination h_max={h}, v_max={v}"
                )));
            }
        };

        self.mcu_width = (usize::from(width) + 8 * self.h_max - 1) / (8 * self.h_max);
        self.mcu_height = (usize::from(height) + 8 * self.v_max - 1) / (8 * self.v_max);

        for comp in &mut components {
            comp.block_width = self.mcu_width * comp.horizontal_sample;
            comp.block_height = self.mcu_height * comp.vertical_sample;
            comp.width_stride = comp.block_width * 8;
            comp.height_stride = comp.block_height * 8;
        }

        self.input_colorspace = if num_components == 1 { ColorSpace::Luma } else { ColorSpace::YCbCr };
        self.info = ImageInfo { width, height, components: num_components };
        self.components = components;

        debug!(
            "SOF0: {width}x{height}, {num_components} component(s), sampling {:?}",
            self.sub_sample_ratio
        );

        Ok(())
    }

    fn parse_dqt(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let mut length = i32::from(reader.read_u16_be_err()?) - 2;

        while length > 0 {
            let pq_tq = reader.read_u8_err()?;
            let precision = pq_tq >> 4;
            let index = usize::from(pq_tq & 0x0F);
            if index >= MAX_COMPONENTS {
                return Err(DecodeErrors::DqtError(format!("Quantization table index {index} out of range")));
            }

            let mut table = [0i32; 64];
            if precision == 0 {
                let bytes = reader.read_exact_bytes(64)?;
                for (i, &b) in bytes.iter().enumerate() {
                    table[UN_ZIGZAG[i]] = i32::from(b);
                }
                length -= 1 + 64;
            } else {
                for i in 0..64 {
                    table[UN_ZIGZAG[i]] = i32::from(reader.read_u16_be_err()?);
                }
                length -= 1 + 128;
            }

            self.qt_tables[index] = Some(table);
        }

        Ok(())
    }

    fn parse_dht(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let mut length = i32::from(reader.read_u16_be_err()?) - 2;

        while length > 0 {
            let tc_th = reader.read_u8_err()?;
            let is_dc = (tc_th >> 4) == 0;
            let index = usize::from(tc_th & 0x0F);
            if index >= MAX_COMPONENTS {
                return Err(DecodeErrors::HuffmanDecode(format!("Huffman table index {index} out of range")));
            }

            let mut num_symbols = [0u8; 16];
            let counts = reader.read_exact_bytes(16)?;
            num_symbols.copy_from_slice(counts);
            let total: usize = num_symbols.iter().map(|&x| x as usize).sum();

            let symbols = reader.read_exact_bytes(total)?.to_vec();
            let table = HuffmanTable::new(&num_symbols, symbols)?;

            if is_dc {
                self.dc_huffman_tables[index] = Some(table);
            } else {
                self.ac_huffman_tables[index] = Some(table);
            }

            length -= 1 + 16 + total as i32;
        }

        Ok(())
    }

    fn parse_dri(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let length = reader.read_u16_be_err()?;
        if length != 4 {
            return Err(DecodeErrors::Format("DRI segment must be exactly 4 bytes".to_string()));
        }
        self.restart_interval = usize::from(reader.read_u16_be_err()?);
        Ok(())
    }

    fn parse_sos(&mut self, reader: &mut ByteReader) -> Result<(), DecodeErrors> {
        let length = reader.read_u16_be_err()?;
        let ns = reader.read_u8_err()?;
        if length != 6 + 2 * u16::from(ns) {
            return Err(DecodeErrors::SosError("SOS segment length does not match component count".to_string()));
        }
        if self.components.is_empty() {
            return Err(DecodeErrors::SosError("SOS segment appeared before SOF0".to_string()));
        }
        if ns == 0 {
            return Err(DecodeErrors::SosError("SOS segment declares zero scan components".to_string()));
        }
        if usize::from(ns) != self.components.len() {
            return Err(DecodeErrors::Unsupported(
                "Non-interleaved/multi-scan images (scan component count differs from frame component count) are not supported".to_string()
            ));
        }

        for _ in 0..ns {
            let id = reader.read_u8_err()?;
            let tables = reader.read_u8_err()?;
            let component = self
                .components
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| DecodeErrors::SosError(format!("SOS references unknown component id {id}")))?;
            component.dc_huffman_table = usize::from(tables >> 4);
            component.ac_huffman_table = usize::from(tables & 0x0F);
        }

        let spectral_start = reader.read_u8_err()?;
        let spectral_end = reader.read_u8_err()?;
        let approx = reader.read_u8_err()?;
        if spectral_start != 0 || spectral_end != 63 || approx != 0 {
            return Err(DecodeErrors::Unsupported(
                "Spectral selection/successive approximation (progressive scans) are not supported".to_string()
            ));
        }

        Ok(())
    }

    fn decode_scan(&mut self) -> Result<Vec<u8>, DecodeErrors> {
        for comp in &self.components {
            if self.qt_tables[usize::from(comp.quantization_table_number)].is_none() {
                return Err(DecodeErrors::DqtError(format!(
                    "Component {} references quantization table {} which was never defined",
                    comp.id, comp.quantization_table_number
                )));
            }
            if self.dc_huffman_tables[comp.dc_huffman_table].is_none()
                || self.ac_huffman_tables[comp.ac_huffman_table].is_none()
            {
                return Err(DecodeErrors::HuffmanDecode(format!(
                    "Component {} references a Huffman table which was never defined",
                    comp.id
                )));
            }
        }

        let mut planes: Vec<Vec<i16>> = self
            .components
            .iter()
            .map(|c| vec![0i16; c.width_stride * c.height_stride])
            .collect();

        // Snapshot the per-component parameters the hot loop needs so it
        // only ever holds one borrow of `self` (the Huffman/quant tables)
        // at a time; `dc_pred` lives in its own array instead of back in
        // `self.components` since it's mutated every block.
        let comp_meta: Vec<CompMeta> = self
            .components
            .iter()
            .map(|c| CompMeta {
                h: c.horizontal_sample,
                v: c.vertical_sample,
                stride: c.width_stride,
                qt_index: usize::from(c.quantization_table_number),
                dc_table: c.dc_huffman_table,
                ac_table: c.ac_huffman_table
            })
            .collect();
        let mut dc_preds = vec![0i32; comp_meta.len()];

        let mut reader = BitReader::new(&self.stream[self.scan_start..]);
        let mut mcus_since_restart = 0usize;
        let mut restart_count = 0usize;
        let mut block = [0i32; 64];

        for my in 0..self.mcu_height {
            for mx in 0..self.mcu_width {
                for (ci, meta) in comp_meta.iter().enumerate() {
                    let qt = self.qt_tables[meta.qt_index].as_ref().unwrap();
                    let dc_table = self.dc_huffman_tables[meta.dc_table].as_ref().unwrap();
                    let ac_table = self.ac_huffman_tables[meta.ac_table].as_ref().unwrap();

                    for by in 0..meta.v {
                        for bx in 0..meta.h {
                            decode_block(&mut reader, dc_table, ac_table, qt, &mut block, &mut dc_preds[ci])?;
                            if reader.exhausted() {
                                return Err(DecodeErrors::Format(
                                    "Unexpected end of entropy-coded data before EOI".to_string()
                                ));
                            }

                            let out_x = (mx * meta.h + bx) * 8;
                            let out_y = (my * meta.v + by) * 8;
                            let mut scratch = [0i16; 64];
                            (self.idct_func)(&mut block, &mut scratch, 8);

                            let plane = &mut planes[ci];
                            for row in 0..8 {
                                let dst_start = (out_y + row) * meta.stride + out_x;
                                plane[dst_start..dst_start + 8]
                                    .copy_from_slice(&scratch[row * 8..row * 8 + 8]);
                            }
                        }
                    }
                }

                mcus_since_restart += 1;
                if self.restart_interval != 0
                    && mcus_since_restart == self.restart_interval
                    && !(my == self.mcu_height - 1 && mx == self.mcu_width - 1)
                {
                    let expected = (restart_count % 8) as u8;
                    reader.reset_after_restart(expected)?;
                    dc_preds.iter_mut().for_each(|p| *p = 0);
                    mcus_since_restart = 0;
                    restart_count += 1;
                }
            }
        }

        self.assemble_output(&planes)
    }

    fn assemble_output(&self, planes: &[Vec<i16>]) -> Result<Vec<u8>, DecodeErrors> {
        let width = usize::from(self.info.width);
        let height = usize::from(self.info.height);
        let num_components = planes.len();

        let mut upsampled: Vec<Vec<u8>> = Vec::with_capacity(num_components);
        for (comp, plane) in self.components.iter().zip(planes.iter()) {
            let samples: Vec<u8> = plane.iter().map(|&v| v as u8).collect();

            if comp.horizontal_sample == self.h_max && comp.vertical_sample == self.v_max {
                upsampled.push(crop_plane(&samples, comp.width_stride, width, height));
                continue;
            }

            let h_scale = self.h_max / comp.horizontal_sample;
            let v_scale = self.v_max / comp.vertical_sample;
            let mut full = vec![0u8; comp.width_stride * h_scale * comp.height_stride * v_scale];
            upsample_nearest(&samples, comp.width_stride, comp.height_stride, h_scale, v_scale, &mut full);
            upsampled.push(crop_plane(&full, comp.width_stride * h_scale, width, height));
        }

        let out_colorspace = self.options.jpeg_get_out_colorspace();
        let mut out = vec![0u8; width * height * out_colorspace.num_components()];

        match (num_components, out_colorspace) {
            (1, ColorSpace::Luma) => ycbcr_to_grayscale(&upsampled[0], &mut out),
            (1, _) => gray_to_rgb(&upsampled[0], &mut out),
            (3, ColorSpace::Luma) => ycbcr_to_grayscale(&upsampled[0], &mut out),
            (3, _) => ycbcr_to_rgb(&upsampled[0], &upsampled[1], &upsampled[2], &mut out),
            _ => {
                return Err(DecodeErrors::Unsupported(format!(
                    "Cannot assemble output for a {num_components}-component frame"
                )));
            }
        }

        Ok(out)
    }
}

fn crop_plane(samples: &[u8], stride: usize, width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for row in 0..height {
        out.extend_from_slice(&samples[row * stride..row * stride + width]);
    }
    out
}

/// Decode a single 8x8 block's DC + AC coefficients, dequantize and
/// descatter them from zig-zag into `block` (natural row-major order).
fn decode_block(
    reader: &mut BitReader, dc_table: &HuffmanTable, ac_table: &HuffmanTable, qt: &[i32; 64],
    block: &mut [i32; 64], dc_pred: &mut i32
) -> Result<(), DecodeErrors> {
    block.fill(0);

    let dc_symbol = dc_table.decode(reader)?;
    if dc_symbol > 15 {
        return Err(DecodeErrors::HuffmanDecode(format!(
            "DC coefficient category {dc_symbol} exceeds the maximum of 15"
        )));
    }
    let diff = if dc_symbol == 0 { 0 } else { extend(reader.get_bits(u32::from(dc_symbol)), dc_symbol) };
    *dc_pred += diff;
    block[0] = *dc_pred * qt[0];

    let mut k = 1usize;
    while k < 64 {
        let rs = ac_table.decode(reader)?;
        let run = rs >> 4;
        let size = rs & 0x0F;

        if size == 0 {
            if run == 15 {
                // ZRL: skip 16 zero coefficients.
                k += 16;
                continue;
            }
            // EOB: all remaining coefficients are zero.
            break;
        }

        k += usize::from(run);
        if k >= 64 {
            return Err(DecodeErrors::HuffmanDecode("AC run exceeded block size".to_string()));
        }

        let value = extend(reader.get_bits(u32::from(size)), size);
        let position = UN_ZIGZAG[k];
        block[position] = value * qt[position];
        k += 1;
    }

    Ok(())
}

/// Sign-extend a `size`-bit Huffman-coded magnitude per ITU-T T.81 F.2.2.1:
/// values in the top half of the range (`>= 1 << (size - 1)`) are positive
/// as read; values in the bottom half represent negatives and must be
/// shifted down by `(1 << size) - 1`.
#[inline]
fn extend(bits: u32, size: u8) -> i32 {
    if size == 0 {
        return 0;
    }
    let vt = 1i32 << (size - 1);
    let value = bits as i32;
    if value < vt {
        value - (1 << size) + 1
    } else {
        value
    }
}
