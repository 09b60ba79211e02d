use rasterlab::Raster;

/// RGB raster where every pixel is `(r, g, b)` derived from its position.
pub fn gradient_rgb(height: usize, width: usize) -> Raster {
    let mut pixels = Vec::with_capacity(height * width * 3);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(((x * 31 + y * 57) % 256) as u8);
        }
    }
    Raster::from_rgb_vec(height, width, pixels).expect("valid synthetic raster")
}

/// Black and white checkerboard with square cells of `cell` pixels.
pub fn checkerboard(height: usize, width: usize, cell: usize) -> Raster {
    let mut pixels = Vec::with_capacity(height * width * 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (y / cell + x / cell) % 2 == 0 { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v]);
        }
    }
    Raster::from_rgb_vec(height, width, pixels).expect("valid synthetic raster")
}
