use core::fmt::Write;
use heapless::String;

/// Width of the gauge drawn after the `R: ` / `P: ` prefix.
pub const GAUGE_WIDTH: usize = 13;

const ARM: usize = 5;
const LIMIT: f32 = 9.9;

/// Marker offset from the center of the gauge, in quarter degrees.
pub fn marker_slot(angle: f32) -> i32 {
    let angle = angle.clamp(-LIMIT, LIMIT);
    ((angle * 4.0).round() as i32).clamp(-(ARM as i32), ARM as i32)
}

/// Render a leveling gauge such as `-->--2.5-----`.
///
/// The magnitude sits between two dashed arms. A negative deviation puts a
/// `>` on the left arm, a positive one a `<` on the right arm; both move in
/// toward the number as the angle approaches zero.
pub fn make_indicator(angle: f32) -> String<GAUGE_WIDTH> {
    let angle = angle.clamp(-LIMIT, LIMIT);
    let mut number: String<8> = String::new();
    // Magnitude is at most 9.9 so it always fits
    let _ = write!(number, "{:3.1}", angle.abs());

    let mut cells = [b'-'; GAUGE_WIDTH];
    for (cell, byte) in cells[ARM..ARM + 3].iter_mut().zip(number.bytes()) {
        *cell = byte;
    }

    let slot = marker_slot(angle);
    if slot < 0 {
        cells[(slot + ARM as i32) as usize] = b'>';
    } else if slot > 0 {
        cells[(slot + ARM as i32 + 2) as usize] = b'<';
    }

    let mut gauge = String::new();
    for byte in cells {
        let _ = gauge.push(byte as char);
    }
    gauge
}
