//! SSD1306 OLED renderer.
//!
//! 128x64 monochrome panel over I2C, drawn with embedded-graphics into
//! the buffered mode and flushed once per frame. Draw errors are
//! swallowed: a glitched frame fixes itself on the next redraw.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::menu::Menu;
use crate::render::{Hud, Renderer};

const ROW_HEIGHT: i32 = 10;
const FIRST_ROW_Y: i32 = 22;
const FONT_WIDTH: i32 = 6;
const SCREEN_WIDTH: i32 = 128;

type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }
}

impl<I2C> Renderer for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn draw_menu(&mut self, menu: &Menu, hud: &Hud) {
        self.display.clear_buffer();
        let style = text_style();

        let _ = Text::new(menu.title(), Point::new(0, 10), style).draw(&mut self.display);

        // Status corner: keep-awake marker and battery percentage.
        let mut corner: String<8> = String::new();
        if hud.keep_awake {
            let _ = corner.push('*');
        }
        if let Some(pct) = hud.battery_percent {
            let _ = write!(&mut corner, "{pct}%");
        }
        if !corner.is_empty() {
            let x = SCREEN_WIDTH - FONT_WIDTH * corner.len() as i32;
            let _ = Text::new(&corner, Point::new(x, 10), style).draw(&mut self.display);
        }

        for (i, item) in menu.visible().iter().enumerate() {
            let y = FIRST_ROW_Y + i as i32 * ROW_HEIGHT;
            if menu.view_start() + i == menu.selected() {
                let _ = Text::new(">", Point::new(0, y), style).draw(&mut self.display);
            }
            let _ = Text::new(item.label(), Point::new(8, y), style).draw(&mut self.display);
        }

        let _ = self.display.flush();
    }

    fn draw_progress(&mut self, name: &str, percent: u8) {
        let percent = percent.min(100);
        self.display.clear_buffer();
        let style = text_style();

        let _ = Text::new("Running", Point::new(0, 10), style).draw(&mut self.display);
        let _ = Text::new(name, Point::new(0, 24), style).draw(&mut self.display);

        let outline = Rectangle::new(Point::new(4, 40), Size::new(120, 12));
        let _ = outline
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
        let width = 116 * u32::from(percent) / 100;
        if width > 0 {
            let fill = Rectangle::new(Point::new(6, 42), Size::new(width, 8));
            let _ = fill
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(&mut self.display);
        }

        let mut label: String<8> = String::new();
        let _ = write!(&mut label, "{percent}%");
        let _ = Text::new(&label, Point::new(0, 62), style).draw(&mut self.display);

        let _ = self.display.flush();
    }

    fn draw_notice(&mut self, title: &str, body: &str) {
        self.display.clear_buffer();
        let style = text_style();

        let _ = Text::new(title, Point::new(0, 10), style).draw(&mut self.display);
        for (i, line) in body.split('\n').take(3).enumerate() {
            let y = 26 + i as i32 * 12;
            let _ = Text::new(line, Point::new(0, y), style).draw(&mut self.display);
        }
        let _ = Text::new("any key: back", Point::new(0, 62), style).draw(&mut self.display);

        let _ = self.display.flush();
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}
