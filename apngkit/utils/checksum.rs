//! Checksums shared by the chunk container (CRC-32) and the zlib wrapper (Adler-32).

const CRC_POLYNOMIAL: u32 = 0xedb88320;
const ADLER_MODULUS: u32 = 65521;

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            if c & 1 == 1 {
                c = CRC_POLYNOMIAL ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }

        table[n] = c;
        n += 1;
    }

    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

/// Feeds `buf` into a running (non-finalized) CRC register.
pub fn update_crc32(crc: u32, buf: &[u8]) -> u32 {
    let mut c = crc;
    for &b in buf {
        c = CRC_TABLE[((c ^ u32::from(b)) & 0xff) as usize] ^ (c >> 8);
    }
    c
}

/// Standard CRC-32 (ISO-HDLC) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    update_crc32(0xffffffff, data) ^ 0xffffffff
}

/// CRC-32 over several consecutive slices, as if they were concatenated.
///
/// Chunk CRCs cover `type || data`; this avoids building that buffer.
pub fn crc32_parts(parts: &[&[u8]]) -> u32 {
    let crc = parts.iter().fold(0xffffffff, |crc, part| update_crc32(crc, part));
    crc ^ 0xffffffff
}

/// Adler-32 (RFC 1950) of `data`.
pub fn adler32(data: &[u8]) -> u32 {
    let mut s1: u32 = 1;
    let mut s2: u32 = 0;

    // 5552 is the largest run that cannot overflow the u32 sums before reduction
    for block in data.chunks(5552) {
        for &b in block {
            s1 += u32::from(b);
            s2 += s1;
        }
        s1 %= ADLER_MODULUS;
        s2 %= ADLER_MODULUS;
    }

    (s2 << 16) | s1
}
