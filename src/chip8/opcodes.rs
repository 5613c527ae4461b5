//! The semantics of each of the 35 opcodes. Split out from `chipset.rs`
//! for cohesion, mirroring how the decode and execute concerns are kept
//! apart in `opcode.rs`.

use crate::definitions::{cpu, display as display_defs};
use crate::error::ExecutionFault;
use crate::opcode::{Arith, KeyOp, Misc, Opcodes};

use super::chipset::ChipSet;

impl ChipSet {
    /// Executes one decoded instruction. Each arm is responsible for its
    /// own program counter movement — there is no implicit advance
    /// applied by the caller, so jumps/calls/skips just write the PC
    /// they mean and nothing more happens afterwards.
    pub(super) fn dispatch(&mut self, decoded: Opcodes) -> Result<(), ExecutionFault> {
        match decoded {
            Opcodes::Sys => self.advance(),

            Opcodes::Cls => {
                self.display_mut().cls();
                self.advance();
            }

            Opcodes::Ret => {
                let addr = self.pop_stack()?;
                self.jump(addr);
            }

            Opcodes::Jp { nnn } => self.jump(nnn),

            Opcodes::Call { nnn } => {
                // return address is the instruction after this CALL
                self.push_stack(self.pc() + 2)?;
                self.jump(nnn);
            }

            Opcodes::Se { x, kk } => {
                if self.reg(x) == kk {
                    self.skip();
                } else {
                    self.advance();
                }
            }

            Opcodes::Sne { x, kk } => {
                if self.reg(x) != kk {
                    self.skip();
                } else {
                    self.advance();
                }
            }

            Opcodes::SeReg { x, y } => {
                if self.reg(x) == self.reg(y) {
                    self.skip();
                } else {
                    self.advance();
                }
            }

            Opcodes::Ld { x, kk } => {
                self.set_reg(x, kk);
                self.advance();
            }

            Opcodes::Add { x, kk } => {
                let sum = self.reg(x).wrapping_add(kk);
                self.set_reg(x, sum);
                self.advance();
            }

            Opcodes::Arith { op, x, y } => {
                self.exec_arith(op, x, y);
                self.advance();
            }

            Opcodes::SneReg { x, y } => {
                if self.reg(x) != self.reg(y) {
                    self.skip();
                } else {
                    self.advance();
                }
            }

            Opcodes::LdI { nnn } => {
                self.set_index(nnn);
                self.advance();
            }

            Opcodes::JpV0 { nnn } => {
                let target = nnn + self.reg(0) as usize;
                self.jump(target);
            }

            Opcodes::Rnd { x, kk } => {
                let byte = self.random_byte();
                self.set_reg(x, byte & kk);
                self.advance();
            }

            Opcodes::Drw { x, y, n } => {
                self.exec_draw(x, y, n);
                self.advance();
            }

            Opcodes::Skp { op, x } => {
                let pressed = self.key_pressed((self.reg(x) & 0xF) as usize);
                let take = match op {
                    KeyOp::Pressed => pressed,
                    KeyOp::NotPressed => !pressed,
                };
                if take {
                    self.skip();
                } else {
                    self.advance();
                }
            }

            Opcodes::Misc { op, x } => self.exec_misc(op, x)?,
        }
        Ok(())
    }

    /// `8XY_` — arithmetic, bitwise, and shift instructions. Order is
    /// always: compute the result, write VF, then write VX. This matters
    /// when `x == 0xF`, where the VX write lands last and wins.
    fn exec_arith(&mut self, op: Arith, x: usize, y: usize) {
        let vx = self.reg(x);
        let vy = self.reg(y);

        match op {
            Arith::Ld => self.set_reg(x, vy),
            Arith::Or => self.set_reg(x, vx | vy),
            Arith::And => self.set_reg(x, vx & vy),
            Arith::Xor => self.set_reg(x, vx ^ vy),
            Arith::Add => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.set_reg(cpu::register::FLAG, carry as u8);
                self.set_reg(x, sum);
            }
            Arith::Sub => {
                let borrow = vx >= vy;
                self.set_reg(cpu::register::FLAG, borrow as u8);
                self.set_reg(x, vx.wrapping_sub(vy));
            }
            Arith::Shr => {
                let source = if self.options().original_impl { vy } else { vx };
                self.set_reg(cpu::register::FLAG, source & 1);
                self.set_reg(x, source >> 1);
            }
            Arith::Subn => {
                let borrow = vy >= vx;
                self.set_reg(cpu::register::FLAG, borrow as u8);
                self.set_reg(x, vy.wrapping_sub(vx));
            }
            Arith::Shl => {
                let source = if self.options().original_impl { vy } else { vx };
                self.set_reg(cpu::register::FLAG, (source >> 7) & 1);
                self.set_reg(x, source << 1);
            }
        }
    }

    /// `DXYN` — draws an `n`-row sprite from memory at `I` onto the
    /// framebuffer, XOR'd in, wrapping at the screen edges.
    fn exec_draw(&mut self, x: usize, y: usize, n: usize) {
        let index = self.index();
        let mut sprite = [0u8; 15];
        for row in 0..n {
            sprite[row] = self.read_mem(index + row);
        }

        let x0 = self.reg(x) as usize % display_defs::WIDTH;
        let y0 = self.reg(y) as usize % display_defs::HEIGHT;

        let collision = self.display_mut().draw_sprite(x0, y0, &sprite[..n]);
        self.set_reg(cpu::register::FLAG, collision as u8);
    }

    /// `FX__` — timers, key wait, index arithmetic, BCD, and block
    /// register transfers.
    fn exec_misc(&mut self, op: Misc, x: usize) -> Result<(), ExecutionFault> {
        match op {
            Misc::GetDelay => {
                self.set_reg(x, self.delay_timer());
                self.advance();
            }
            Misc::WaitKey => {
                if let Some(key) = self.first_pressed_key() {
                    self.set_reg(x, key as u8);
                    self.advance();
                } else {
                    // rewind: re-dispatch this exact instruction next cycle
                    // while the loop keeps polling input and ticking timers.
                }
            }
            Misc::SetDelay => {
                self.set_delay_timer(self.reg(x));
                self.advance();
            }
            Misc::SetSound => {
                self.set_sound_timer(self.reg(x));
                self.advance();
            }
            Misc::AddToIndex => {
                let sum = self.index() + self.reg(x) as usize;
                let overflow = sum > 0x0FFF;
                self.set_reg(cpu::register::FLAG, overflow as u8);
                self.set_index(sum);
                self.advance();
            }
            Misc::FontChar => {
                let digit = (self.reg(x) & 0xF) as usize;
                self.set_index(
                    display_defs::fontset::LOCATION + digit * display_defs::fontset::GLYPH_SIZE,
                );
                self.advance();
            }
            Misc::Bcd => {
                let value = self.reg(x);
                let index = self.index();
                self.write_mem(index, value / 100);
                self.write_mem(index + 1, (value / 10) % 10);
                self.write_mem(index + 2, value % 10);
                self.advance();
            }
            Misc::StoreRegs => {
                let index = self.index();
                for i in 0..=x {
                    self.write_mem(index + i, self.reg(i));
                }
                if self.options().original_impl {
                    self.set_index(index + x + 1);
                }
                self.advance();
            }
            Misc::LoadRegs => {
                let index = self.index();
                for i in 0..=x {
                    self.set_reg(i, self.read_mem(index + i));
                }
                if self.options().original_impl {
                    self.set_index(index + x + 1);
                }
                self.advance();
            }
        }
        Ok(())
    }
}
