//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! ARFF/array-syntax reader and writer (§6 external collaborator). A single
//! parser serves both bracket dialects via [`Mode`] rather than keeping the
//! upstream's three near-duplicate readers separate.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::Error;
pub use reader::{read, Mode};
pub use writer::write;
